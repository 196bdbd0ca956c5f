// Viewport autoscaling: refits a panel's vertical axis to the bounds of the
// rows inside the currently visible time window, with a trailing-edge
// debounce so continuous panning coalesces into a single apply.

use chrono::NaiveDateTime;
use shared::models::{AxisRange, Dataset, ViewRange};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

/// Padding added on each side of the fitted range, as a fraction of its span.
pub const AXIS_PAD_RATIO: f64 = 0.05;

/// Which panel a controller instance fits. Each panel reads its own bound
/// columns and owns its own vertical axis; only the time window is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Candle,
    Macd,
}

impl Panel {
    fn bounds<'a>(&self, dataset: &'a Dataset) -> (&'a [f64], &'a [f64]) {
        match self {
            Panel::Candle => (&dataset.candle_bound_min, &dataset.candle_bound_max),
            Panel::Macd => (&dataset.macd_bound_min, &dataset.macd_bound_max),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Panel::Candle => "candle",
            Panel::Macd => "macd",
        }
    }
}

/// Computes the padded vertical range covering every row whose time falls in
/// `view`. Returns `None` when no row is visible: a degenerate scan must not
/// produce an inverted or infinite axis, the caller leaves the range as is.
pub fn fit_range(
    times: &[NaiveDateTime],
    bound_min: &[f64],
    bound_max: &[f64],
    view: ViewRange,
) -> Option<AxisRange> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for (i, t) in times.iter().enumerate() {
        if view.start <= *t && *t <= view.end {
            min = min.min(bound_min[i]);
            max = max.max(bound_max[i]);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return None;
    }

    let pad = (max - min) * AXIS_PAD_RATIO;
    Some(AxisRange {
        start: min - pad,
        end: max + pad,
    })
}

/// Reactive autoscaler for one panel.
///
/// Subscribes to the published dataset and to the shared visible window, and
/// writes this panel's axis range. View events are debounced on the trailing
/// edge: at most one apply is pending at any instant, and a new event always
/// supersedes it, so a burst of pan/zoom events settles into exactly one
/// recomputation using the last window of the burst.
pub struct AutoscaleController {
    panel: Panel,
    dataset_rx: watch::Receiver<Arc<Dataset>>,
    view_rx: watch::Receiver<ViewRange>,
    axis_tx: watch::Sender<AxisRange>,
    debounce: Duration,
}

impl AutoscaleController {
    pub fn new(
        panel: Panel,
        dataset_rx: watch::Receiver<Arc<Dataset>>,
        view_rx: watch::Receiver<ViewRange>,
        axis_tx: watch::Sender<AxisRange>,
        debounce: Duration,
    ) -> Self {
        AutoscaleController {
            panel,
            dataset_rx,
            view_rx,
            axis_tx,
            debounce,
        }
    }

    /// The event loop. Runs until the view-range channel closes.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                changed = self.view_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = self.settle_view().await;
                    self.apply(view);
                }
                changed = self.dataset_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    // A fresh dataset refits immediately against the current
                    // window; there is no burst to wait out.
                    let view = *self.view_rx.borrow();
                    self.apply(view);
                }
            }
        }
    }

    /// Trailing-edge debounce: waits until `debounce` elapses with no further
    /// view event, returning the last window seen.
    async fn settle_view(&mut self) -> ViewRange {
        let mut view = *self.view_rx.borrow_and_update();
        loop {
            tokio::select! {
                _ = time::sleep(self.debounce) => break,
                changed = self.view_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    view = *self.view_rx.borrow_and_update();
                }
            }
        }
        view
    }

    fn apply(&self, view: ViewRange) {
        let dataset = self.dataset_rx.borrow().clone();
        let (bound_min, bound_max) = self.panel.bounds(&dataset);

        match fit_range(&dataset.time, bound_min, bound_max, view) {
            Some(range) => {
                // Idempotent: re-applying an identical range notifies nobody.
                let modified = self.axis_tx.send_if_modified(|current| {
                    if *current == range {
                        false
                    } else {
                        *current = range;
                        true
                    }
                });
                if modified {
                    tracing::debug!(
                        panel = self.panel.name(),
                        start = range.start,
                        end = range.end,
                        "Applied autoscaled axis range"
                    );
                }
            }
            None => {
                tracing::debug!(
                    panel = self.panel.name(),
                    "No rows in visible window, axis left unchanged"
                );
            }
        }
    }
}
