// Daily bars from the Yahoo Finance chart API.

use super::market_data::{normalize_bars, MarketDataProvider};
use crate::config::FetchSettings;
use crate::error::EngineError;
use chrono::{DateTime, NaiveDate};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use shared::models::PriceBar;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

pub struct YahooProvider {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl YahooProvider {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().user_agent("Mozilla/5.0").build()?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: FetchSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    /// `{base_url}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=..`
    pub fn chart_url(&self, symbol: &str) -> Result<Url, EngineError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|e| EngineError::Config(format!("Invalid provider URL '{}': {}", self.settings.base_url, e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| EngineError::Config(format!("Provider URL cannot be a base: {}", self.settings.base_url)))?;
            segments.pop_if_empty().extend(["v8", "finance", "chart", symbol]);
        }
        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(self.settings.start_date).to_string())
            .append_pair("period2", &unix_midnight(self.settings.end_date).to_string())
            .append_pair("interval", &self.settings.interval);
        Ok(url)
    }
}

impl MarketDataProvider for YahooProvider {
    async fn fetch_daily_bars(&self, symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
        let url = self.chart_url(symbol)?;
        tracing::info!(symbol = %symbol, url = %url, "Fetching daily bars");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await?;
            return match parse_chart(&body) {
                Ok(_) => {
                    tracing::warn!(symbol = %symbol, %status, "Provider has no data for this request");
                    Ok(Vec::new())
                }
                Err(_) if status == StatusCode::NOT_FOUND => {
                    tracing::warn!(symbol = %symbol, "Provider does not know this symbol");
                    Ok(Vec::new())
                }
                Err(e) => {
                    tracing::error!(symbol = %symbol, %status, error_detail = ?e, "Provider rejected the request");
                    Err(EngineError::Fetch(format!("HTTP {} for '{}'", status, symbol)))
                }
            };
        }
        let body = response.error_for_status()?.text().await?;

        let bars = parse_chart(&body)?;
        let bars = normalize_bars(bars, self.settings.start_date, self.settings.end_date);
        tracing::info!(symbol = %symbol, count = bars.len(), "Fetched daily bars");
        Ok(bars)
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp()).unwrap_or_default()
}

/// Decodes a chart API payload. A provider-side error object or a missing
/// result decodes to no bars; rows with any missing price are dropped.
pub fn parse_chart(body: &str) -> Result<Vec<PriceBar>, EngineError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| EngineError::Fetch(format!("Unexpected chart payload: {}", e)))?;

    if let Some(error) = response.chart.error {
        tracing::warn!(
            code = %error.code,
            description = error.description.as_deref().unwrap_or(""),
            "Provider returned an error"
        );
        return Ok(Vec::new());
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };

    let offset = result.meta.gmtoffset;
    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let field = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) =
            (field(&quote.open[..]), field(&quote.high[..]), field(&quote.low[..]), field(&quote.close[..]))
        else {
            continue;
        };
        let Some(local) = DateTime::from_timestamp(ts + offset, 0) else {
            continue;
        };
        bars.push(PriceBar {
            date: local.date_naive(),
            open,
            high,
            low,
            close,
            volume: field(&quote.volume[..]).unwrap_or(0.0),
        });
    }
    Ok(bars)
}
