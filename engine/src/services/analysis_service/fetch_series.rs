// Fetch stage: symbol validation and the empty-result check.
use crate::data::MarketDataProvider;
use crate::error::EngineError;
use shared::models::PriceBar;

pub async fn handle_fetch_series<P: MarketDataProvider>(provider: &P, symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
    if symbol.is_empty() {
        tracing::warn!("Blank symbol, skipping fetch");
        return Err(EngineError::NoData { symbol: symbol.to_string() });
    }

    let bars = match provider.fetch_daily_bars(symbol).await {
        Ok(bars) => bars,
        Err(e) => {
            tracing::error!(symbol = %symbol, error_detail = ?e, "Fetching market data failed");
            return Err(e);
        }
    };

    if bars.is_empty() {
        tracing::warn!(symbol = %symbol, "Provider returned no bars");
        return Err(EngineError::NoData { symbol: symbol.to_string() });
    }

    tracing::debug!(symbol = %symbol, count = bars.len(), first = %bars[0].date, last = %bars[bars.len() - 1].date, "Bars fetched");
    Ok(bars)
}
