// Exponential Moving Average (EMA)

/// Recursive exponential average with smoothing factor `2 / (window + 1)`,
/// seeded by the first value: `ema[0] = values[0]`. This is the non-adjusted
/// recursive definition, so every row has a value from index 0 onward.
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "EMA window must be greater than 0");

    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let alpha = 2.0 / (window as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut previous = first;
    results.push(previous);

    for &value in &values[1..] {
        previous = alpha * value + (1.0 - alpha) * previous;
        results.push(previous);
    }
    results
}
