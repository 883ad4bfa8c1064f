// Simple Moving Average (SMA) of close
use super::window::{mean, rolling};
use super::IndicatorCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::PriceBar;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::Indicator("SMA period must be greater than 0".to_string()));
        }
        Ok(Self {
            name: format!("SMA({})", period),
            period,
        })
    }
}

impl IndicatorCalculator for Sma {
    type Output = Vec<f64>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = data.iter().map(|b| b.close).collect();
        rolling(&closes, self.period, mean)
    }
}
