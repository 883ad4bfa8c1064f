use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Market data fetch error: {0}")]
    Fetch(String),

    #[error("No data found for symbol '{symbol}'")]
    NoData { symbol: String },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Indicator calculation error: {0}")]
    Indicator(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::Fetch(err.to_string())
    }
}

impl EngineError {
    /// Text shown to the user when an analysis request fails.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::NoData { .. } => "No data found for the provided symbol.".to_string(),
            EngineError::Fetch(msg) => format!("Could not fetch market data: {}", msg),
            other => other.to_string(),
        }
    }
}
