// Simple Moving Average (SMA)

/// Arithmetic mean of the trailing `window` values.
///
/// The first `window - 1` entries are `None`: there is not enough history
/// yet, and substituting zero would corrupt anything derived from them.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    assert!(window > 0, "SMA window must be greater than 0");

    if values.len() < window {
        return vec![None; values.len()];
    }

    let mut results = vec![None; window - 1];

    // Sliding window sum over the rest.
    let mut sum: f64 = values.iter().take(window).sum();
    results.push(Some(sum / window as f64));

    for i in window..values.len() {
        sum = sum - values[i - window] + values[i];
        results.push(Some(sum / window as f64));
    }
    results
}
