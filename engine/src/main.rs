// Chart engine entry point. Stands in for the rendering surface: wires the
// selection channel, the shared view window and both autoscale panels, and
// logs what a renderer would draw.
use engine::config::settings::ChartSettings;
use engine::session::ChartSession;
use engine::viewport::{AutoscaleController, Panel};
use shared::models::{AxisRange, MaKind, ViewRange};
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut settings = ChartSettings::default();
    let mut args = std::env::args().skip(1);
    if let Some(path) = args.next() {
        settings.csv_path = path;
    }
    if let Some(pair) = args.next() {
        settings.pair = pair;
    }
    info!(path = %settings.csv_path, pair = %settings.pair, "Starting OHLC chart engine");

    let debounce = Duration::from_millis(settings.autoscale_debounce_ms);

    // The selection control and the visible window are owned by the surface;
    // here they are plain channels fed from this binary.
    let (kind_tx, kind_rx) = watch::channel(MaKind::Simple);
    let session = ChartSession::new(settings, kind_rx)?;

    let mut dataset_rx = session.dataset().subscribe();
    let idle_axis = AxisRange { start: 0.0, end: 1.0 };
    let (view_tx, view_rx) = watch::channel(ViewRange {
        start: chrono::NaiveDateTime::MIN,
        end: chrono::NaiveDateTime::MAX,
    });
    let (candle_axis_tx, mut candle_axis_rx) = watch::channel(idle_axis);
    let (macd_axis_tx, mut macd_axis_rx) = watch::channel(idle_axis);

    tokio::spawn(
        AutoscaleController::new(
            Panel::Candle,
            session.dataset().subscribe(),
            view_rx.clone(),
            candle_axis_tx,
            debounce,
        )
        .run(),
    );
    tokio::spawn(
        AutoscaleController::new(
            Panel::Macd,
            session.dataset().subscribe(),
            view_rx,
            macd_axis_tx,
            debounce,
        )
        .run(),
    );

    tokio::spawn(async move {
        while candle_axis_rx.changed().await.is_ok() {
            let range = *candle_axis_rx.borrow_and_update();
            info!(start = range.start, end = range.end, "Candle panel axis updated");
        }
    });
    tokio::spawn(async move {
        while macd_axis_rx.changed().await.is_ok() {
            let range = *macd_axis_rx.borrow_and_update();
            info!(start = range.start, end = range.end, "MACD panel axis updated");
        }
    });

    // The surface's initial render: once the first dataset lands, show the
    // whole series.
    tokio::spawn(async move {
        while dataset_rx.changed().await.is_ok() {
            let dataset = dataset_rx.borrow_and_update().clone();
            info!(rows = dataset.len(), "Dataset published");
            if let (Some(first), Some(last)) = (dataset.time.first(), dataset.time.last()) {
                let _ = view_tx.send(ViewRange {
                    start: *first,
                    end: *last,
                });
            }
        }
    });

    let result = tokio::select! {
        res = session.run() => res.map_err(Into::into),
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    };
    drop(kind_tx);
    result
}
