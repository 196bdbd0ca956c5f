// Technical indicators module
pub mod ema;
pub mod macd;
pub mod sma;

use shared::models::{Bar, IndicatorRow, MaKind};

use self::ema::ema;
use self::macd::macd_series;
use self::sma::sma;

/// Moving-average spans of the chart overlay. MACD reuses the same fast/slow
/// spans with a 9-period signal line.
pub const MA_SLOW_WINDOW: usize = 30;
pub const MA_FAST_WINDOW: usize = 13;
pub const MACD_SIGNAL_WINDOW: usize = 9;

/// Enriches a normalized series with both moving averages (of the selected
/// kind), the MACD histogram and the per-row axis bounds of both panels.
///
/// Stateless: switching `kind` back and forth reproduces identical columns,
/// there is no incremental carry-over between invocations.
pub fn compute_rows(series: &[Bar], kind: MaKind) -> Vec<IndicatorRow> {
    if series.is_empty() {
        return Vec::new();
    }

    let closes: Vec<f64> = series.iter().map(|b| b.close).collect();

    let (ma_slow, ma_fast) = match kind {
        MaKind::Simple => (sma(&closes, MA_SLOW_WINDOW), sma(&closes, MA_FAST_WINDOW)),
        MaKind::Exponential => (
            ema(&closes, MA_SLOW_WINDOW).into_iter().map(Some).collect(),
            ema(&closes, MA_FAST_WINDOW).into_iter().map(Some).collect(),
        ),
    };

    let macd = macd_series(&closes);

    series
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            time: bar.time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            ma_slow: ma_slow[i],
            ma_fast: ma_fast[i],
            macdh: macd.histogram[i],
            candle_bound_min: bar.low,
            candle_bound_max: bar.high,
            macd_bound_min: macd.bound_min[i],
            macd_bound_max: macd.bound_max[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn sample_series(len: usize) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2020, 9, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        (0..len)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.4).sin() * 3.0;
                Bar {
                    time: start + Duration::minutes(5 * i as i64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_series_yields_empty_rows() {
        assert!(compute_rows(&[], MaKind::Simple).is_empty());
        assert!(compute_rows(&[], MaKind::Exponential).is_empty());
    }

    #[test]
    fn test_rows_align_one_to_one() {
        let series = sample_series(50);
        assert_eq!(compute_rows(&series, MaKind::Simple).len(), 50);
        assert_eq!(compute_rows(&series, MaKind::Exponential).len(), 50);
    }

    #[test]
    fn test_sma_warm_up_rows_are_absent() {
        let series = sample_series(40);
        let rows = compute_rows(&series, MaKind::Simple);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.ma_slow.is_none(), i < MA_SLOW_WINDOW - 1, "slow at {}", i);
            assert_eq!(row.ma_fast.is_none(), i < MA_FAST_WINDOW - 1, "fast at {}", i);
        }
    }

    #[test]
    fn test_ema_defined_from_row_zero() {
        let series = sample_series(40);
        let rows = compute_rows(&series, MaKind::Exponential);
        assert!(rows.iter().all(|r| r.ma_slow.is_some() && r.ma_fast.is_some()));
        assert_eq!(rows[0].ma_slow, Some(series[0].close));
    }

    #[test]
    fn test_series_shorter_than_slow_window_keeps_rows() {
        let series = sample_series(10);
        let rows = compute_rows(&series, MaKind::Simple);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.ma_slow.is_none()));
    }

    #[test]
    fn test_candle_bounds_are_low_and_high() {
        let series = sample_series(20);
        for (bar, row) in series.iter().zip(compute_rows(&series, MaKind::Simple)) {
            assert_eq!(row.candle_bound_min, bar.low);
            assert_eq!(row.candle_bound_max, bar.high);
        }
    }

    #[test]
    fn test_kind_switch_round_trip_is_bit_identical() {
        let series = sample_series(64);
        let before = compute_rows(&series, MaKind::Simple);
        let _ = compute_rows(&series, MaKind::Exponential);
        let after = compute_rows(&series, MaKind::Simple);
        assert_eq!(before, after);
    }

    #[test]
    fn test_macd_columns_identical_across_kinds() {
        let series = sample_series(64);
        let simple = compute_rows(&series, MaKind::Simple);
        let exponential = compute_rows(&series, MaKind::Exponential);
        for (a, b) in simple.iter().zip(&exponential) {
            assert_eq!(a.macdh, b.macdh);
            assert_eq!(a.macd_bound_min, b.macd_bound_min);
            assert_eq!(a.macd_bound_max, b.macd_bound_max);
        }
    }
}
