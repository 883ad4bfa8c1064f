// Text helpers shared by the engine (log output) and the GUI.
use crate::models::SignalMatrix;

/// Renders the signal matrix as a fixed-width text table.
///
/// ```text
///         MA_Signal  BB_Signal  CCI_Signal
/// 1 Day   BUY        NEUTRAL    SELL
/// 1 Week  BUY        NEUTRAL    NEUTRAL
/// ```
pub fn format_signal_table(signals: &SignalMatrix) -> String {
    let mut out = format!("{:<8}", "");
    for column in SignalMatrix::COLUMNS {
        out.push_str(&format!("{:<11}", column));
    }
    let mut out = out.trim_end().to_string();

    for row in signals.rows() {
        let mut line = format!("{:<8}", row.horizon.label());
        for cell in row.cells() {
            line.push_str(&format!("{:<11}", cell.as_str()));
        }
        out.push('\n');
        out.push_str(line.trim_end());
    }
    out
}

/// Formats an indicator value for display, showing undefined values as "NaN".
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.decimals$}", value, decimals = decimals)
    }
}
