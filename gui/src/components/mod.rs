// GUI components module
pub mod chart;
pub mod signal_table;
pub mod toolbar;

pub use chart::ChartView;
pub use signal_table::SignalTable;
pub use toolbar::Toolbar;
