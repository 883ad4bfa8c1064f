// In-process client for the analysis engine.
use crate::config::AppConfig;
use anyhow::{Context, Result};
use engine::data::{CsvProvider, YahooProvider};
use engine::{AnalysisReport, AnalysisService, EngineError};

/// Picks the data source from the config: CSV exports when `csv_dir` is set,
/// otherwise the live provider.
pub enum EngineClient {
    Live(AnalysisService<YahooProvider>),
    Offline(AnalysisService<CsvProvider>),
}

impl EngineClient {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let settings = config.engine.clone();
        let client = match &config.app.csv_dir {
            Some(dir) => {
                tracing::info!(dir = %dir, "Using offline CSV data");
                let provider = CsvProvider::new(dir, settings.fetch.clone());
                EngineClient::Offline(AnalysisService::new(provider, settings)?)
            }
            None => {
                let provider = YahooProvider::new(settings.fetch.clone()).context("Failed to build HTTP client")?;
                EngineClient::Live(AnalysisService::new(provider, settings)?)
            }
        };
        Ok(client)
    }

    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisReport, EngineError> {
        match self {
            EngineClient::Live(service) => service.analyze(symbol).await,
            EngineClient::Offline(service) => service.analyze(symbol).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn offline_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::load_default().unwrap();
        config.app.csv_dir = Some(dir.path().display().to_string());
        config
    }

    #[tokio::test]
    async fn test_offline_analysis() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("EURINR=X.csv")).unwrap();
        writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
        for day in 0..30 {
            let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(day);
            let close = 89.0 + day as f64 * 0.1;
            writeln!(file, "{},{},{},{},{},{},0", date, close, close + 0.2, close - 0.2, close, close).unwrap();
        }
        drop(file);

        let client = EngineClient::from_config(&offline_config(&dir)).unwrap();
        assert!(matches!(client, EngineClient::Offline(_)));
        let report = client.analyze("EURINR=X").await.unwrap();
        assert_eq!(report.bar_count(), 30);
    }

    #[tokio::test]
    async fn test_offline_missing_symbol() {
        let dir = TempDir::new().unwrap();
        let client = EngineClient::from_config(&offline_config(&dir)).unwrap();
        let err = client.analyze("ZZZZ=X").await.unwrap_err();
        assert_eq!(err.user_message(), "No data found for the provided symbol.");
    }

    #[test]
    fn test_default_is_live() {
        let client = EngineClient::from_config(&AppConfig::load_default().unwrap()).unwrap();
        assert!(matches!(client, EngineClient::Live(_)));
    }
}
