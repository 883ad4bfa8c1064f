// Analysis pipeline: fetch -> indicators -> signals -> chart.
//
// AnalysisService owns the configured stages; each call to `analyze` runs
// them in order for one symbol inside its own tracing span.
use crate::chart::ChartRenderer;
use crate::config::EngineSettings;
use crate::data::MarketDataProvider;
use crate::error::EngineError;
use crate::indicators::IndicatorSet;
use crate::signals::SignalGenerator;
use tracing::Instrument;
use uuid::Uuid;

pub mod build_report;
pub mod fetch_series;
pub mod report;

pub use report::AnalysisReport;

pub struct AnalysisService<P: MarketDataProvider> {
    provider: P,
    settings: EngineSettings,
    indicators: IndicatorSet,
    signals: SignalGenerator,
    chart: ChartRenderer,
}

impl<P: MarketDataProvider> AnalysisService<P> {
    pub fn new(provider: P, settings: EngineSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        let indicators = IndicatorSet::new(&settings.indicators)?;
        let signals = SignalGenerator::new(&settings.signals, &settings.indicators);
        let chart = ChartRenderer::new(settings.chart.clone(), settings.indicators.cci_threshold);
        Ok(Self { provider, settings, indicators, signals, chart })
    }

    /// Runs the full analysis for `symbol`. Surrounding whitespace is ignored;
    /// a blank symbol or an empty fetch yields `EngineError::NoData`.
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisReport, EngineError> {
        let symbol = symbol.trim();
        let span = tracing::info_span!("analysis", analysis_id = %Uuid::new_v4(), symbol = %symbol);

        async move {
            tracing::info!(
                start = %self.settings.fetch.start_date,
                end = %self.settings.fetch.end_date,
                "Received analysis request, dispatching to handlers."
            );
            let bars = fetch_series::handle_fetch_series(&self.provider, symbol).await?;
            let report = build_report::handle_build_report(symbol, &bars, &self.indicators, &self.signals, &self.chart)?;
            tracing::info!(bars = report.bar_count(), "Analysis complete");
            Ok(report)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemoryProvider;
    use crate::indicators::test_support::bars_from_closes;
    use shared::models::Signal;

    fn service_with(symbol: &str, closes: &[f64]) -> AnalysisService<InMemoryProvider> {
        let provider = InMemoryProvider::new().with_bars(symbol, bars_from_closes(closes));
        AnalysisService::new(provider, EngineSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_no_data() {
        let service = service_with("EURINR=X", &[1.0; 30]);
        let err = service.analyze("ZZZZ=X").await.unwrap_err();
        assert!(matches!(err, EngineError::NoData { ref symbol } if symbol == "ZZZZ=X"));
        assert_eq!(err.user_message(), "No data found for the provided symbol.");
    }

    #[tokio::test]
    async fn test_blank_symbol_is_no_data() {
        let service = service_with("EURINR=X", &[1.0; 30]);
        assert!(matches!(service.analyze("   ").await, Err(EngineError::NoData { .. })));
    }

    #[tokio::test]
    async fn test_rising_closes_report() {
        let closes: Vec<f64> = (100..=124).map(|c| c as f64).collect();
        let service = service_with("EURINR=X", &closes);
        let report = service.analyze(" EURINR=X ").await.unwrap();

        assert_eq!(report.symbol, "EURINR=X");
        assert_eq!(report.bar_count(), 25);
        assert_eq!(report.series.bars.len(), 25);
        assert_eq!(report.signals.day.ma, Signal::Buy);
        assert_eq!(report.signals.week.ma, Signal::Buy);
        assert_eq!(report.indicators.len(), 3);
        assert!(report.chart.svg().contains("Price with MA and Bollinger Bands"));
        assert!(report.period().is_some());
    }

    #[tokio::test]
    async fn test_short_history_still_reports() {
        let service = service_with("NEW", &[1.0, 1.1, 1.2]);
        let report = service.analyze("NEW").await.unwrap();
        for row in report.signals.rows() {
            assert_eq!(row.cells(), [Signal::Neutral; 3]);
        }
        assert!(report.series.bars.iter().all(|b| b.ma20.is_nan()));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = EngineSettings::default();
        settings.indicators.window = 0;
        assert!(AnalysisService::new(InMemoryProvider::new(), settings).is_err());
    }
}
