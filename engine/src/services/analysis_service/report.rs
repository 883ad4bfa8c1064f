use crate::chart::ChartImage;
use shared::models::{EnrichedSeries, IndicatorDescriptor, SignalMatrix};

/// Everything one analysis produces for the presentation layer.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub symbol: String,
    pub series: EnrichedSeries,
    pub signals: SignalMatrix,
    pub chart: ChartImage,
    pub indicators: Vec<IndicatorDescriptor>,
}

impl AnalysisReport {
    pub fn bar_count(&self) -> usize {
        self.series.len()
    }

    /// Date range covered by the fetched bars.
    pub fn period(&self) -> Option<(chrono::NaiveDate, chrono::NaiveDate)> {
        let first = self.series.bars.first()?.bar.date;
        let last = self.series.bars.last()?.bar.date;
        Some((first, last))
    }
}
