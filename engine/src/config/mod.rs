// Engine configuration module
pub mod settings;

pub use settings::{ChartSettings, EngineSettings, FetchSettings, IndicatorSettings, SignalSettings};
