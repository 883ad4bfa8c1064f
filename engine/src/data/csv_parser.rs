// Offline market data: provider-format CSV exports, one file per symbol.
use super::market_data::{normalize_bars, MarketDataProvider};
use crate::config::FetchSettings;
use crate::error::EngineError;
use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::PriceBar;
use std::io::Read;
use std::path::PathBuf;

// Field parsing for the provider's CSV export format.
pub mod provider_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    /// Parses "2023-01-02", also accepting a trailing time part such as
    /// "2023-01-02 00:00:00+00:00".
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        let s = s.trim();
        let day = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))
    }

    /// Parses a price; empty and "null" fields are missing values.
    pub fn parse_price(s: &str) -> Result<Option<f64>> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("null") || s.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        s.parse::<f64>().map(Some).map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

}

pub struct ProviderCsvParser;

impl ProviderCsvParser {
    // CSV Header: Date,Open,High,Low,Close,Adj Close,Volume
    // Example Row: 2023-01-02,88.6129,88.9350,88.3650,88.6129,88.6129,0
    pub fn load_bars<R: Read>(reader: R) -> Result<Vec<PriceBar>> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_reader(reader);

        let mut bars = Vec::new();
        let headers = rdr.headers()?.clone();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let date_str = Self::required_field(&record, &headers, "Date", line)?;
            let date = provider_format::parse_date(date_str)
                .map_err(|e| anyhow!("Error parsing 'Date' at line {}: {}", line, e))?;

            let mut prices = [0.0; 4];
            let mut complete = true;
            for (slot, name) in prices.iter_mut().zip(["Open", "High", "Low", "Close"]) {
                let raw = Self::required_field(&record, &headers, name, line)?;
                match provider_format::parse_price(raw)
                    .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", name, line, e))?
                {
                    Some(value) => *slot = value,
                    None => complete = false,
                }
            }
            if !complete {
                tracing::debug!(line, %date, "Skipping CSV row with missing prices");
                continue;
            }

            let volume = match Self::get_field(&record, &headers, "Volume") {
                Some(raw) => provider_format::parse_price(raw)
                    .map_err(|e| anyhow!("Error parsing 'Volume' at line {}: {}", line, e))?
                    .unwrap_or(0.0),
                None => 0.0,
            };

            let [open, high, low, close] = prices;
            bars.push(PriceBar { date, open, high, low, close, volume });
        }
        Ok(bars)
    }

    fn required_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }
}

/// Reads `<dir>/<symbol>.csv` exports instead of calling the provider. A
/// symbol without a file has no data.
pub struct CsvProvider {
    dir: PathBuf,
    settings: FetchSettings,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>, settings: FetchSettings) -> Self {
        Self { dir: dir.into(), settings }
    }

    fn path_for(&self, symbol: &str) -> Option<PathBuf> {
        let valid = !symbol.is_empty()
            && symbol.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '=' | '^' | '.' | '-' | '_'))
            && !symbol.starts_with('.');
        valid.then(|| self.dir.join(format!("{}.csv", symbol)))
    }
}

impl MarketDataProvider for CsvProvider {
    async fn fetch_daily_bars(&self, symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
        let Some(path) = self.path_for(symbol) else {
            tracing::warn!(symbol = %symbol, "Symbol cannot name a CSV export");
            return Ok(Vec::new());
        };

        let content = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(symbol = %symbol, path = %path.display(), "No CSV export for symbol");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let bars = ProviderCsvParser::load_bars(content.as_slice())
            .map_err(|e| EngineError::CsvDataFormatError(format!("{}: {}", path.display(), e)))?;
        let bars = normalize_bars(bars, self.settings.start_date, self.settings.end_date);
        tracing::info!(symbol = %symbol, count = bars.len(), "Loaded daily bars from CSV");
        Ok(bars)
    }
}
