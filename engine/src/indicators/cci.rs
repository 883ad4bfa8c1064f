// Commodity Channel Index (CCI) over typical price
use super::window::{mean, mean_absolute_deviation, rolling};
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::PriceBar;

pub struct Cci {
    name: String,
    period: usize,
    constant: f64,
}

impl Cci {
    pub fn new(period: usize, constant: f64) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::Indicator("CCI period must be greater than 0".to_string()));
        }
        if !constant.is_finite() || constant <= 0.0 {
            return Err(EngineError::Indicator(format!("Invalid CCI constant: {}", constant)));
        }
        Ok(Self {
            name: format!("CCI({})", period),
            period,
            constant,
        })
    }
}

impl IndicatorCalculator for Cci {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "constant": self.constant })
    }

    fn calculate(&self, data: &[PriceBar]) -> Vec<f64> {
        let typical: Vec<f64> = data.iter().map(PriceBar::typical_price).collect();
        let sma = rolling(&typical, self.period, mean);
        let mad = rolling(&typical, self.period, mean_absolute_deviation);

        typical
            .iter()
            .zip(sma.iter().zip(&mad))
            .map(|(tp, (m, d))| {
                // A flat window has no deviation to normalize by.
                if *d == 0.0 {
                    f64::NAN
                } else {
                    (tp - m) / (self.constant * d)
                }
            })
            .collect()
    }
}
