use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw feed row, as stored in the CSV: a closed (or still-forming)
/// 5-minute candle for a single pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub pair: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Moving-average kind selected by the overlay control.
///
/// MACD is always EMA-based independently of this choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MaKind {
    Simple,
    Exponential,
}

impl std::fmt::Display for MaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // User-facing option labels on the selection control.
        match self {
            MaKind::Simple => write!(f, "SMA (13/30)"),
            MaKind::Exponential => write!(f, "EMA (13/30)"),
        }
    }
}

/// One normalized row: pair and volume dropped, timestamp converted to the
/// display zone with zone metadata discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A `Bar` enriched with the indicator columns, 1:1 with the normalized
/// series. Averages are `None` inside the warm-up window; they must never be
/// coerced to zero or they would corrupt the axis bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub ma_slow: Option<f64>,
    pub ma_fast: Option<f64>,
    pub macdh: f64,
    pub candle_bound_min: f64,
    pub candle_bound_max: f64,
    pub macd_bound_min: f64,
    pub macd_bound_max: f64,
}

/// The columnar snapshot handed to the rendering surface. All columns are
/// index-aligned and equal length; the renderer only ever sees a whole
/// `Dataset`, never individual column updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub time: Vec<NaiveDateTime>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub ma_slow: Vec<Option<f64>>,
    pub ma_fast: Vec<Option<f64>>,
    pub macdh: Vec<f64>,
    pub candle_bound_min: Vec<f64>,
    pub candle_bound_max: Vec<f64>,
    pub macd_bound_min: Vec<f64>,
    pub macd_bound_max: Vec<f64>,
}

impl Dataset {
    /// Fixed column names of the render contract, in publication order.
    pub const COLUMNS: [&'static str; 12] = [
        "time",
        "open",
        "high",
        "low",
        "close",
        "ma_slow",
        "ma_fast",
        "macdh",
        "candle_bound_min",
        "candle_bound_max",
        "macd_bound_min",
        "macd_bound_max",
    ];

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Per-column lengths, aligned with [`Dataset::COLUMNS`]. Used by the
    /// publisher to reject ragged snapshots before the swap.
    pub fn column_lens(&self) -> [(&'static str, usize); 12] {
        [
            ("time", self.time.len()),
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
            ("close", self.close.len()),
            ("ma_slow", self.ma_slow.len()),
            ("ma_fast", self.ma_fast.len()),
            ("macdh", self.macdh.len()),
            ("candle_bound_min", self.candle_bound_min.len()),
            ("candle_bound_max", self.candle_bound_max.len()),
            ("macd_bound_min", self.macd_bound_min.len()),
            ("macd_bound_max", self.macd_bound_max.len()),
        ]
    }
}

/// The currently visible time window of the shared horizontal axis. Owned by
/// the rendering surface, read-only input to the autoscale controllers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A vertical axis range produced by an autoscale pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}
