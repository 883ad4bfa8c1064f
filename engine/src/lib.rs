// Engine library root: market data, indicators, signals and chart rendering
// behind a single `AnalysisService`.

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod services;
pub mod signals;

pub use chart::{ChartImage, ChartRenderer};
pub use config::EngineSettings;
pub use error::EngineError;
pub use services::{AnalysisReport, AnalysisService};
