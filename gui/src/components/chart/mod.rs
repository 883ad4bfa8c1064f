// Chart display: the engine renders SVG, this module only embeds it.
pub mod chart_view;

pub use chart_view::ChartView;
