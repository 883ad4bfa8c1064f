// GUI configuration, embedded from assets/config/default.json
pub mod theme;

use anyhow::{Context, Result};
use engine::config::EngineSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub default_symbol: String,
    #[serde(default = "default_theme")]
    pub theme: String, // "dark" or "light"
    /// When set, bars are read from `<csv_dir>/<symbol>.csv` instead of the provider.
    #[serde(default)]
    pub csv_dir: Option<String>,
}

fn default_theme() -> String {
    "light".to_string()
}

impl AppConfig {
    pub fn load_default() -> Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str).context("Embedded default configuration is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json).context("Failed to parse application config")?;
        config.engine.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config.app.title, "Stock Analysis App");
        assert_eq!(config.app.default_symbol, "EURINR=X");
        assert_eq!(config.app.csv_dir, None);
        assert_eq!(config.engine, EngineSettings::default());
    }

    #[test]
    fn test_engine_section_optional() {
        let config = AppConfig::from_json(r#"{"version":"1","app":{"title":"T","default_symbol":"AAPL"}}"#).unwrap();
        assert_eq!(config.app.theme, "light");
        assert_eq!(config.engine.indicators.window, 20);
    }

    #[test]
    fn test_invalid_engine_section_rejected() {
        let json = r#"{"version":"1","app":{"title":"T","default_symbol":"X"},"engine":{"signals":{"week_window":0}}}"#;
        assert!(AppConfig::from_json(json).is_err());
    }
}
