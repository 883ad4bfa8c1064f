// Trailing-window helpers shared by the indicator calculators.

/// Applies `f` to every full trailing window of `values`. Positions without a
/// full window (the first `window - 1`) are `NaN`.
pub fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return vec![f64::NAN; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                f(&values[i + 1 - window..=i])
            }
        })
        .collect()
}

/// Arithmetic mean. `NaN` propagates; an empty slice yields `NaN`.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n).
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Mean absolute deviation from the mean.
pub fn mean_absolute_deviation(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).abs()).sum::<f64>() / values.len() as f64
}
