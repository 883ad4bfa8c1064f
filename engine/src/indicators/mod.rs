// Technical indicators module
pub mod bollinger;
pub mod cci;
pub mod sma;
pub mod window;

pub use bollinger::{BollingerBands, BollingerOutput};
pub use cci::Cci;
pub use sma::Sma;

use crate::config::IndicatorSettings;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{EnrichedBar, EnrichedSeries, IndicatorDescriptor, PriceBar};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[PriceBar]) -> Self::Output; // NaN where a full window is unavailable

    fn descriptor(&self) -> IndicatorDescriptor {
        IndicatorDescriptor {
            name: self.name().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// The MA / Bollinger / CCI trio applied to every analysed series.
pub struct IndicatorSet {
    sma: Sma,
    bands: BollingerBands,
    cci: Cci,
}

impl IndicatorSet {
    pub fn new(settings: &IndicatorSettings) -> Result<Self, EngineError> {
        Ok(Self {
            sma: Sma::new(settings.window)?,
            bands: BollingerBands::new(settings.window, settings.band_multiplier)?,
            cci: Cci::new(settings.window, settings.cci_constant)?,
        })
    }

    pub fn descriptors(&self) -> Vec<IndicatorDescriptor> {
        vec![self.sma.descriptor(), self.bands.descriptor(), self.cci.descriptor()]
    }

    /// Computes every indicator over `bars` and zips the results into a new
    /// series. The input is left untouched.
    pub fn enrich(&self, symbol: &str, bars: &[PriceBar]) -> EnrichedSeries {
        let ma = self.sma.calculate(bars);
        let bands = self.bands.calculate(bars);
        let cci = self.cci.calculate(bars);

        let enriched: Vec<EnrichedBar> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| EnrichedBar {
                bar: bar.clone(),
                ma20: ma[i],
                bb_upper: bands.upper[i],
                bb_middle: bands.middle[i],
                bb_lower: bands.lower[i],
                cci: cci[i],
            })
            .collect();

        tracing::debug!(
            symbol = %symbol,
            bars = bars.len(),
            defined_from = ?enriched.iter().position(EnrichedBar::is_defined),
            "Indicators computed"
        );

        EnrichedSeries {
            symbol: symbol.to_string(),
            bars: enriched,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{bar, bars_from_closes};
    use super::*;

    #[test]
    fn test_enrich_aligns_with_input() {
        let bars: Vec<PriceBar> = (0..25).map(|i| bar(i, 100.0, 102.0 + i as f64, 98.0, 100.0 + i as f64)).collect();
        let series = IndicatorSet::new(&IndicatorSettings::default()).unwrap().enrich("EURUSD=X", &bars);

        assert_eq!(series.symbol, "EURUSD=X");
        assert_eq!(series.len(), bars.len());
        for (enriched, original) in series.bars.iter().zip(&bars) {
            assert_eq!(&enriched.bar, original);
        }
        assert!(series.bars[..19].iter().all(|b| !b.is_defined()));
        assert!(series.bars[19..].iter().all(|b| b.is_defined()));
    }

    #[test]
    fn test_middle_band_equals_ma20() {
        let closes: Vec<f64> = (0..40).map(|i| 1.05 + (i as f64).cos() * 0.01).collect();
        let series = IndicatorSet::new(&IndicatorSettings::default())
            .unwrap()
            .enrich("T", &bars_from_closes(&closes));
        for b in &series.bars {
            assert!(b.ma20 == b.bb_middle || (b.ma20.is_nan() && b.bb_middle.is_nan()));
        }
    }

    #[test]
    fn test_short_history_is_all_nan() {
        let series = IndicatorSet::new(&IndicatorSettings::default())
            .unwrap()
            .enrich("T", &bars_from_closes(&[1.0; 19]));
        assert!(series.bars.iter().all(|b| b.ma20.is_nan() && b.cci.is_nan() && b.bb_upper.is_nan()));
    }

    #[test]
    fn test_descriptors() {
        let set = IndicatorSet::new(&IndicatorSettings::default()).unwrap();
        let names: Vec<String> = set.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["SMA(20)", "BB(20, 2)", "CCI(20)"]);
    }

    #[test]
    fn test_zero_window_rejected() {
        let settings = IndicatorSettings { window: 0, ..IndicatorSettings::default() };
        assert!(IndicatorSet::new(&settings).is_err());
    }
}
