// Market data acquisition: the provider seam plus an in-memory implementation.
use crate::error::EngineError;
use chrono::NaiveDate;
use shared::models::PriceBar;
use std::collections::HashMap;
use std::future::Future;

/// Source of daily price bars for a symbol.
///
/// An unknown or malformed symbol is not an error: implementations return an
/// empty vector and let the caller decide. `Err` is reserved for transport or
/// decoding failures.
pub trait MarketDataProvider: Send + Sync {
    fn fetch_daily_bars(&self, symbol: &str) -> impl Future<Output = Result<Vec<PriceBar>, EngineError>> + Send;
}

/// Sorts bars chronologically, drops duplicate dates (keeping the first
/// occurrence) and keeps only `start <= date < end`.
pub fn normalize_bars(mut bars: Vec<PriceBar>, start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
    bars.retain(|b| b.date >= start && b.date < end);
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    bars
}

/// Bars held in memory per symbol. Used for offline runs and tests.
pub struct InMemoryProvider {
    data: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        InMemoryProvider { data: HashMap::new() }
    }

    pub fn add_bars(&mut self, symbol: &str, new_bars: Vec<PriceBar>) {
        let bars = self.data.entry(symbol.to_string()).or_default();
        bars.extend(new_bars);
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.add_bars(symbol, bars);
        self
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for InMemoryProvider {
    async fn fetch_daily_bars(&self, symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }
}
