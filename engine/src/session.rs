// Chart session: wires the selection control to the full recomputation
// pipeline (load -> indicators -> publish).

use shared::models::MaKind;
use std::path::Path;
use tokio::sync::watch;

use crate::config::settings::ChartSettings;
use crate::data::loader::load_series;
use crate::dataset::{build_dataset, DatasetCell};
use crate::error::EngineError;
use crate::indicators::compute_rows;

/// Owns the published dataset and re-runs the pipeline end to end whenever
/// the moving-average kind changes. Recomputation is always from scratch;
/// the pipeline carries no state between invocations.
pub struct ChartSession {
    settings: ChartSettings,
    kind_rx: watch::Receiver<MaKind>,
    dataset: DatasetCell,
}

impl ChartSession {
    pub fn new(
        settings: ChartSettings,
        kind_rx: watch::Receiver<MaKind>,
    ) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(ChartSession {
            settings,
            kind_rx,
            dataset: DatasetCell::new(),
        })
    }

    pub fn dataset(&self) -> &DatasetCell {
        &self.dataset
    }

    /// One full pipeline pass. Any failure aborts before the swap, so the
    /// previously published dataset stays visible.
    pub fn recompute(&self) -> Result<(), EngineError> {
        let kind = *self.kind_rx.borrow();
        let offset = self.settings.display_offset()?;
        let series = load_series(
            Path::new(&self.settings.csv_path),
            &self.settings.pair,
            offset,
        )?;
        let rows = compute_rows(&series, kind);
        let dataset = build_dataset(&rows)?;

        tracing::info!(
            pair = %self.settings.pair,
            kind = %kind,
            rows = dataset.len(),
            "Recomputed chart dataset"
        );
        self.dataset.replace(dataset);
        Ok(())
    }

    /// Initial load, then one recomputation per kind-change event. The
    /// initial failure is fatal: there is no chart without a first dataset.
    /// Later failures keep the previous dataset visible.
    pub async fn run(mut self) -> Result<(), EngineError> {
        self.recompute()?;

        while self.kind_rx.changed().await.is_ok() {
            if let Err(e) = self.recompute() {
                tracing::error!(error = %e, "Recomputation failed, keeping previous dataset");
            }
        }
        Ok(())
    }
}
