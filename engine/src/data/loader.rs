use chrono::FixedOffset;
use shared::models::{Bar, Candle};
use shared::utils::to_display_time;
use std::path::Path;

use crate::data::csv_parser::FeedCsvParser;
use crate::error::EngineError;

/// Loads the feed, filters it to one pair and normalizes it for charting.
///
/// The last row is dropped unconditionally: the most recent 5-minute candle
/// has not closed yet and its OHLC values are still moving.
/// Pure function of its inputs.
pub fn load_series(
    path: &Path,
    pair: &str,
    display_offset: FixedOffset,
) -> Result<Vec<Bar>, EngineError> {
    let candles = FeedCsvParser::load_candles_from_csv(path)?;

    let filtered: Vec<Candle> = candles.into_iter().filter(|c| c.pair == pair).collect();
    if filtered.is_empty() {
        return Err(EngineError::NoData {
            pair: pair.to_string(),
        });
    }

    for w in filtered.windows(2) {
        if w[1].timestamp <= w[0].timestamp {
            return Err(EngineError::CsvDataFormatError(format!(
                "Timestamps for '{}' are not strictly increasing around {}",
                pair, w[1].timestamp
            )));
        }
    }

    let bars = filtered
        .iter()
        .take(filtered.len() - 1)
        .map(|c| Bar {
            time: to_display_time(c.timestamp, display_offset),
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        })
        .collect();

    Ok(bars)
}
