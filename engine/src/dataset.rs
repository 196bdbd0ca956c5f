// Dataset publishing: column assembly plus the observable state cell the
// rendering surface and the autoscale controllers subscribe to.

use shared::models::{Dataset, IndicatorRow};
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::EngineError;

/// Assembles the enriched rows into one columnar snapshot.
///
/// Everything is built locally and validated before anything becomes visible
/// to a reader; a ragged column set aborts the recomputation here, ahead of
/// the atomic swap.
pub fn build_dataset(rows: &[IndicatorRow]) -> Result<Dataset, EngineError> {
    let mut dataset = Dataset {
        time: Vec::with_capacity(rows.len()),
        open: Vec::with_capacity(rows.len()),
        high: Vec::with_capacity(rows.len()),
        low: Vec::with_capacity(rows.len()),
        close: Vec::with_capacity(rows.len()),
        ma_slow: Vec::with_capacity(rows.len()),
        ma_fast: Vec::with_capacity(rows.len()),
        macdh: Vec::with_capacity(rows.len()),
        candle_bound_min: Vec::with_capacity(rows.len()),
        candle_bound_max: Vec::with_capacity(rows.len()),
        macd_bound_min: Vec::with_capacity(rows.len()),
        macd_bound_max: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        dataset.time.push(row.time);
        dataset.open.push(row.open);
        dataset.high.push(row.high);
        dataset.low.push(row.low);
        dataset.close.push(row.close);
        dataset.ma_slow.push(row.ma_slow);
        dataset.ma_fast.push(row.ma_fast);
        dataset.macdh.push(row.macdh);
        dataset.candle_bound_min.push(row.candle_bound_min);
        dataset.candle_bound_max.push(row.candle_bound_max);
        dataset.macd_bound_min.push(row.macd_bound_min);
        dataset.macd_bound_max.push(row.macd_bound_max);
    }

    validate_columns(&dataset, rows.len())?;
    Ok(dataset)
}

fn validate_columns(dataset: &Dataset, expected: usize) -> Result<(), EngineError> {
    for (column, actual) in dataset.column_lens() {
        if actual != expected {
            return Err(EngineError::ColumnMismatch {
                column,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// The shared dataset, made explicit: one owned cell with an atomic replace
/// operation and a subscription mechanism for dependents.
///
/// Readers hold an `Arc<Dataset>`, so a replace can never tear a snapshot
/// they are in the middle of reading, and a `watch` borrow always yields a
/// fully-old or fully-new column set.
#[derive(Debug)]
pub struct DatasetCell {
    tx: watch::Sender<Arc<Dataset>>,
}

impl DatasetCell {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Dataset::default()));
        DatasetCell { tx }
    }

    /// Atomically swaps in a new snapshot and notifies subscribers.
    pub fn replace(&self, dataset: Dataset) {
        tracing::debug!(rows = dataset.len(), "Publishing new dataset snapshot");
        // send_replace delivers even with no subscriber attached yet.
        self.tx.send_replace(Arc::new(dataset));
    }

    /// Registers a dependent (the renderer or an autoscale controller).
    pub fn subscribe(&self) -> watch::Receiver<Arc<Dataset>> {
        self.tx.subscribe()
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Dataset> {
        self.tx.borrow().clone()
    }
}

impl Default for DatasetCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::compute_rows;
    use chrono::{Duration, NaiveDate};
    use shared::models::{Bar, MaKind};

    fn sample_rows(len: usize) -> Vec<IndicatorRow> {
        let start = NaiveDate::from_ymd_opt(2020, 9, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let series: Vec<Bar> = (0..len)
            .map(|i| Bar {
                time: start + Duration::minutes(5 * i as i64),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0 + i as f64 * 0.1,
            })
            .collect();
        compute_rows(&series, MaKind::Simple)
    }

    #[test]
    fn test_build_dataset_all_columns_same_length() {
        let dataset = build_dataset(&sample_rows(40)).unwrap();
        assert_eq!(dataset.len(), 40);
        assert!(dataset.column_lens().iter().all(|&(_, len)| len == 40));
    }

    #[test]
    fn test_build_dataset_empty_rows() {
        let dataset = build_dataset(&[]).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_validate_rejects_ragged_columns() {
        let mut dataset = build_dataset(&sample_rows(10)).unwrap();
        dataset.macdh.pop();
        let err = validate_columns(&dataset, 10).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ColumnMismatch {
                column: "macdh",
                expected: 10,
                actual: 9,
            }
        ));
    }

    #[test]
    fn test_cell_starts_empty() {
        let cell = DatasetCell::new();
        assert!(cell.snapshot().is_empty());
    }

    #[test]
    fn test_replace_notifies_subscribers() {
        let cell = DatasetCell::new();
        let mut rx = cell.subscribe();
        assert!(!rx.has_changed().unwrap());

        cell.replace(build_dataset(&sample_rows(5)).unwrap());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 5);
    }

    #[test]
    fn test_replace_is_atomic_for_held_snapshots() {
        let cell = DatasetCell::new();
        cell.replace(build_dataset(&sample_rows(5)).unwrap());

        // A reader working from an older snapshot keeps a coherent column
        // set even after a replace.
        let held = cell.snapshot();
        cell.replace(build_dataset(&sample_rows(9)).unwrap());

        assert!(held.column_lens().iter().all(|&(_, len)| len == 5));
        assert!(cell.snapshot().column_lens().iter().all(|&(_, len)| len == 9));
    }

    #[test]
    fn test_subscriber_borrow_never_tears() {
        let cell = DatasetCell::new();
        let mut rx = cell.subscribe();
        cell.replace(build_dataset(&sample_rows(7)).unwrap());
        cell.replace(build_dataset(&sample_rows(3)).unwrap());

        // Only the latest full snapshot is observable.
        let seen = rx.borrow_and_update().clone();
        let expected = seen.len();
        assert!(seen.column_lens().iter().all(|&(_, len)| len == expected));
        assert_eq!(expected, 3);
    }
}
