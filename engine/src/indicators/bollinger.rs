// Bollinger Bands over close: middle = SMA, bands at +/- multiplier * population std
use super::window::{mean, population_std, rolling};
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::PriceBar;

pub struct BollingerBands {
    name: String,
    period: usize,
    multiplier: f64,
}

/// Positionally aligned with the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: f64) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::Indicator("Bollinger period must be greater than 0".to_string()));
        }
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(EngineError::Indicator(format!("Invalid Bollinger multiplier: {}", multiplier)));
        }
        Ok(Self {
            name: format!("BB({}, {})", period, multiplier),
            period,
            multiplier,
        })
    }
}

impl IndicatorCalculator for BollingerBands {
    type Output = BollingerOutput;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "multiplier": self.multiplier })
    }

    fn calculate(&self, data: &[PriceBar]) -> BollingerOutput {
        let closes: Vec<f64> = data.iter().map(|b| b.close).collect();
        let middle = rolling(&closes, self.period, mean);
        let std = rolling(&closes, self.period, population_std);

        let upper = middle.iter().zip(&std).map(|(m, s)| m + self.multiplier * s).collect();
        let lower = middle.iter().zip(&std).map(|(m, s)| m - self.multiplier * s).collect();

        BollingerOutput { upper, middle, lower }
    }
}
