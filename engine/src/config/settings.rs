// Engine settings. Every field has a serde default so a partial JSON section
// (e.g. the "engine" block of the GUI config) deserializes cleanly.
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::EngineError;

/// Upper bound for `ChartSettings::width` and `panel_height`.
pub const MAX_CHART_DIMENSION: u32 = 20_000;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub fetch: FetchSettings,
    pub indicators: IndicatorSettings,
    pub signals: SignalSettings,
    pub chart: ChartSettings,
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(json)
            .map_err(|e| EngineError::Config(format!("Invalid engine settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.fetch.start_date >= self.fetch.end_date {
            return Err(EngineError::Config(format!(
                "start_date {} must be before end_date {}",
                self.fetch.start_date, self.fetch.end_date
            )));
        }
        if self.indicators.window == 0 {
            return Err(EngineError::Config("Indicator window must be greater than 0".to_string()));
        }
        if self.signals.week_window == 0 {
            return Err(EngineError::Config("Week window must be greater than 0".to_string()));
        }
        if self.chart.width == 0 || self.chart.panel_height == 0 {
            return Err(EngineError::Config("Chart dimensions must be non-zero".to_string()));
        }
        if self.chart.width > MAX_CHART_DIMENSION || self.chart.panel_height > MAX_CHART_DIMENSION {
            return Err(EngineError::Config(format!(
                "Chart dimensions must not exceed {} pixels",
                MAX_CHART_DIMENSION
            )));
        }
        Ok(())
    }
}

/// Where and what to fetch. The date range is fixed for the application;
/// `end_date` is exclusive.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FetchSettings {
    pub base_url: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap_or_default(),
            interval: "1d".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub window: usize,
    pub band_multiplier: f64,
    pub cci_constant: f64,
    /// CCI above `+cci_threshold` is SELL, below `-cci_threshold` is BUY.
    pub cci_threshold: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            window: 20,
            band_multiplier: 2.0,
            cci_constant: 0.015,
            cci_threshold: 100.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SignalSettings {
    pub week_window: usize,
}

impl Default for SignalSettings {
    fn default() -> Self {
        SignalSettings { week_window: 5 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub panel_height: u32,
    pub background: String,
    pub grid_color: String,
    pub text_color: String,
    pub price_color: String,
    pub ma_color: String,
    pub bb_upper_color: String,
    pub bb_lower_color: String,
    pub cci_color: String,
    pub overbought_color: String,
    pub oversold_color: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            width: 1500,
            panel_height: 500,
            background: "#ffffff".to_string(),
            grid_color: "#e0e0e0".to_string(),
            text_color: "#222222".to_string(),
            price_color: "#1f77b4".to_string(),
            ma_color: "#ff7f0e".to_string(),
            bb_upper_color: "#2ca02c".to_string(),
            bb_lower_color: "#d62728".to_string(),
            cci_color: "#800080".to_string(),
            overbought_color: "#ff0000".to_string(),
            oversold_color: "#008000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_range() {
        let settings = EngineSettings::default();
        assert_eq!(settings.fetch.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(settings.fetch.end_date, NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        assert_eq!(settings.indicators.window, 20);
        assert_eq!(settings.indicators.cci_constant, 0.015);
        assert_eq!(settings.signals.week_window, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json(r#"{ "chart": { "width": 800 } }"#).unwrap();
        assert_eq!(settings.chart.width, 800);
        assert_eq!(settings.chart.panel_height, 500);
        assert_eq!(settings.fetch, FetchSettings::default());
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let json = r#"{ "fetch": { "start_date": "2024-09-30", "end_date": "2023-01-01" } }"#;
        let err = EngineSettings::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = EngineSettings::from_json(r#"{ "indicators": { "window": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("window"));
    }

    #[test]
    fn test_oversized_chart_rejected() {
        let settings = EngineSettings::from_json(r#"{ "chart": { "panel_height": 4294967295 } }"#);
        assert!(matches!(settings, Err(EngineError::Config(_))));

        let mut settings = EngineSettings::default();
        settings.chart.width = MAX_CHART_DIMENSION;
        settings.chart.panel_height = MAX_CHART_DIMENSION;
        assert!(settings.validate().is_ok());
        settings.chart.panel_height = MAX_CHART_DIMENSION + 1;
        assert!(settings.validate().is_err());
    }
}
