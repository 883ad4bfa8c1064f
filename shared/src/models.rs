use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trading day of OHLC data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// A price bar plus the indicator values computed over the trailing window
/// ending at it. Values are `NaN` until a full window is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedBar {
    pub bar: PriceBar,
    pub ma20: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub cci: f64,
}

impl EnrichedBar {
    pub fn is_defined(&self) -> bool {
        !(self.ma20.is_nan()
            || self.bb_upper.is_nan()
            || self.bb_middle.is_nan()
            || self.bb_lower.is_nan()
            || self.cci.is_nan())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSeries {
    pub symbol: String,
    pub bars: Vec<EnrichedBar>,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The last `window` bars, or all of them when the series is shorter.
    pub fn trailing(&self, window: usize) -> &[EnrichedBar] {
        let start = self.bars.len().saturating_sub(window);
        &self.bars[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookback over which a signal row is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Day,
    Week,
}

impl Horizon {
    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Day => "1 Day",
            Horizon::Week => "1 Week",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRow {
    pub horizon: Horizon,
    pub ma: Signal,
    pub bb: Signal,
    pub cci: Signal,
}

/// Fixed 2x3 table: rows "1 Day" and "1 Week", columns MA/BB/CCI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalMatrix {
    pub day: SignalRow,
    pub week: SignalRow,
}

impl SignalMatrix {
    pub const COLUMNS: [&'static str; 3] = ["MA_Signal", "BB_Signal", "CCI_Signal"];

    pub fn rows(&self) -> [SignalRow; 2] {
        [self.day, self.week]
    }
}

impl SignalRow {
    pub fn cells(&self) -> [Signal; 3] {
        [self.ma, self.bb, self.cci]
    }
}

/// Name and parameters of an indicator that was applied to a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDescriptor {
    pub name: String,
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undefined(bar: PriceBar) -> EnrichedBar {
        EnrichedBar {
            bar,
            ma20: f64::NAN,
            bb_upper: f64::NAN,
            bb_middle: f64::NAN,
            bb_lower: f64::NAN,
            cci: f64::NAN,
        }
    }

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 3.0,
            low: close - 3.0,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_typical_price() {
        let b = PriceBar { high: 12.0, low: 6.0, close: 9.0, ..bar(1, 9.0) };
        assert_eq!(b.typical_price(), 9.0);
    }

    #[test]
    fn test_trailing_shorter_than_window() {
        let series = EnrichedSeries {
            symbol: "TEST".to_string(),
            bars: (1..=3).map(|d| undefined(bar(d, d as f64))).collect(),
        };
        assert_eq!(series.trailing(5).len(), 3);
        assert_eq!(series.trailing(1)[0].bar.close, 3.0);
    }

    #[test]
    fn test_undefined_bar_is_not_defined() {
        assert!(!undefined(bar(1, 1.0)).is_defined());
        let defined = EnrichedBar { ma20: 1.0, bb_upper: 2.0, bb_middle: 1.0, bb_lower: 0.0, cci: 0.0, ..undefined(bar(1, 1.0)) };
        assert!(defined.is_defined());
    }

    #[test]
    fn test_signal_labels() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::Sell.to_string(), "SELL");
        assert_eq!(Signal::Neutral.to_string(), "NEUTRAL");
        assert_eq!(serde_json::to_string(&Signal::Neutral).unwrap(), "\"NEUTRAL\"");
    }

    #[test]
    fn test_horizon_labels() {
        assert_eq!(Horizon::Day.label(), "1 Day");
        assert_eq!(Horizon::Week.to_string(), "1 Week");
    }
}
