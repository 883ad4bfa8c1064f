// Compute stage: indicators, signals and chart over fetched bars.
use super::AnalysisReport;
use crate::chart::ChartRenderer;
use crate::error::EngineError;
use crate::indicators::IndicatorSet;
use crate::signals::SignalGenerator;
use shared::models::PriceBar;
use shared::utils::format_signal_table;

pub fn handle_build_report(
    symbol: &str,
    bars: &[PriceBar],
    indicators: &IndicatorSet,
    signals: &SignalGenerator,
    chart: &ChartRenderer,
) -> Result<AnalysisReport, EngineError> {
    let series = indicators.enrich(symbol, bars);
    let matrix = signals.generate(&series);
    tracing::info!(symbol = %symbol, "Trading signals\n{}", format_signal_table(&matrix));

    let descriptors = indicators.descriptors();
    let image = chart.render(&series, &descriptors)?;

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        series,
        signals: matrix,
        chart: image,
        indicators: descriptors,
    })
}
