// UI state for one analysis request.
use engine::{AnalysisReport, EngineError};
use shared::utils::format_value;

#[derive(Debug, Clone, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading { symbol: String },
    Ready(AnalysisReport),
    Failed(String),
}

impl AnalysisState {
    pub fn from_result(result: Result<AnalysisReport, EngineError>) -> Self {
        match result {
            Ok(report) => AnalysisState::Ready(report),
            Err(e) => {
                tracing::warn!(error = %e, "Analysis failed");
                AnalysisState::Failed(e.user_message())
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, AnalysisState::Loading { .. })
    }

    pub fn status_text(&self) -> String {
        match self {
            AnalysisState::Idle => "Enter a symbol and press Analyze.".to_string(),
            AnalysisState::Loading { symbol } => format!("Analyzing {}...", symbol),
            AnalysisState::Ready(report) => match (report.period(), report.series.bars.last()) {
                (Some((first, last)), Some(latest)) => format!(
                    "{}: {} bars from {} to {}, last close {}, CCI {}",
                    report.symbol,
                    report.bar_count(),
                    first,
                    last,
                    format_value(latest.bar.close, 4),
                    format_value(latest.cci, 2)
                ),
                _ => report.symbol.clone(),
            },
            AnalysisState::Failed(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        let state = AnalysisState::from_result(Err(EngineError::NoData { symbol: "ZZZZ=X".to_string() }));
        assert!(matches!(state, AnalysisState::Failed(ref m) if m == "No data found for the provided symbol."));
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn test_ready_status_shows_latest_values() {
        use engine::data::InMemoryProvider;
        use engine::{AnalysisService, EngineSettings};
        use shared::models::PriceBar;

        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..3u64)
            .map(|i| PriceBar {
                date: start + chrono::Days::new(i),
                open: 88.0,
                high: 88.5,
                low: 87.5,
                close: 88.0 + i as f64 * 0.125,
                volume: 0.0,
            })
            .collect();
        let provider = InMemoryProvider::new().with_bars("EURINR=X", bars);
        let service = AnalysisService::new(provider, EngineSettings::default()).unwrap();

        let state = AnalysisState::from_result(service.analyze("EURINR=X").await);
        assert_eq!(
            state.status_text(),
            "EURINR=X: 3 bars from 2024-01-01 to 2024-01-03, last close 88.2500, CCI NaN"
        );
    }

    #[test]
    fn test_loading_is_busy() {
        let state = AnalysisState::Loading { symbol: "EURINR=X".to_string() };
        assert!(state.is_busy());
        assert_eq!(state.status_text(), "Analyzing EURINR=X...");
    }
}
