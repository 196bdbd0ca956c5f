// Moving Average Convergence/Divergence (MACD)

use super::ema::ema;
use super::{MA_FAST_WINDOW, MA_SLOW_WINDOW, MACD_SIGNAL_WINDOW};

/// The MACD family computed over one close series, index-aligned with it,
/// plus per-row extrema across the three series for axis fitting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
    pub bound_min: Vec<f64>,
    pub bound_max: Vec<f64>,
}

/// MACD over `closes`: fast EMA(13) minus slow EMA(30), EMA(9) signal line
/// and their difference as the histogram.
///
/// Always EMA-based, independent of the moving-average kind selected for the
/// chart overlay.
pub fn macd_series(closes: &[f64]) -> MacdSeries {
    if closes.is_empty() {
        return MacdSeries::default();
    }

    let fast = ema(closes, MA_FAST_WINDOW);
    let slow = ema(closes, MA_SLOW_WINDOW);

    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema(&macd, MACD_SIGNAL_WINDOW);
    let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    let mut bound_min = Vec::with_capacity(closes.len());
    let mut bound_max = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        let values = [macd[i], signal[i], histogram[i]];
        bound_min.push(values.iter().copied().fold(f64::INFINITY, f64::min));
        bound_max.push(values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    }

    MacdSeries {
        macd,
        signal,
        histogram,
        bound_min,
        bound_max,
    }
}
