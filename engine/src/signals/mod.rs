// Signal derivation over an enriched series.
//
// Every cell of the matrix goes through `classify`, and both rows go through
// `evaluate` with the horizon's trailing window.
use crate::config::{IndicatorSettings, SignalSettings};
use crate::indicators::window::mean;
use shared::models::{EnrichedBar, EnrichedSeries, Horizon, Signal, SignalMatrix, SignalRow};

/// One side of a signal condition. Comparisons are strict, so a value equal
/// to the threshold (or a `NaN` on either side) never matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Above(f64),
    Below(f64),
}

impl Rule {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Rule::Above(threshold) => value > threshold,
            Rule::Below(threshold) => value < threshold,
        }
    }
}

pub fn classify(value: f64, buy: Rule, sell: Rule) -> Signal {
    if buy.matches(value) {
        Signal::Buy
    } else if sell.matches(value) {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

/// Field-wise mean over a trailing window. A `NaN` in any bar makes the
/// corresponding mean `NaN`.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub close: f64,
    pub ma20: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub cci: f64,
}

impl Snapshot {
    pub fn of(bars: &[EnrichedBar]) -> Self {
        let field = |f: fn(&EnrichedBar) -> f64| mean(&bars.iter().map(f).collect::<Vec<_>>());
        Snapshot {
            close: field(|b| b.bar.close),
            ma20: field(|b| b.ma20),
            bb_upper: field(|b| b.bb_upper),
            bb_lower: field(|b| b.bb_lower),
            cci: field(|b| b.cci),
        }
    }
}

pub struct SignalGenerator {
    week_window: usize,
    cci_threshold: f64,
}

impl SignalGenerator {
    pub fn new(signals: &SignalSettings, indicators: &IndicatorSettings) -> Self {
        Self {
            week_window: signals.week_window,
            cci_threshold: indicators.cci_threshold,
        }
    }

    pub fn window(&self, horizon: Horizon) -> usize {
        match horizon {
            Horizon::Day => 1,
            Horizon::Week => self.week_window,
        }
    }

    /// Evaluates one row of the matrix against the mean of the trailing
    /// window for `horizon`.
    pub fn evaluate(&self, series: &EnrichedSeries, horizon: Horizon) -> SignalRow {
        let snapshot = Snapshot::of(series.trailing(self.window(horizon)));
        let t = self.cci_threshold;

        SignalRow {
            horizon,
            ma: classify(snapshot.close, Rule::Above(snapshot.ma20), Rule::Below(snapshot.ma20)),
            bb: classify(snapshot.close, Rule::Below(snapshot.bb_lower), Rule::Above(snapshot.bb_upper)),
            cci: classify(snapshot.cci, Rule::Below(-t), Rule::Above(t)),
        }
    }

    pub fn generate(&self, series: &EnrichedSeries) -> SignalMatrix {
        let matrix = SignalMatrix {
            day: self.evaluate(series, Horizon::Day),
            week: self.evaluate(series, Horizon::Week),
        };
        tracing::debug!(symbol = %series.symbol, ?matrix, "Signals derived");
        matrix
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(&SignalSettings::default(), &IndicatorSettings::default())
    }
}
