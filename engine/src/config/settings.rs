// Chart settings, potentially loaded from a config file or environment variables
use chrono::FixedOffset;
use serde::Deserialize;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    /// Path of the raw OHLCV feed file.
    pub csv_path: String,
    /// Instrument the chart is filtered to, e.g. "BTC/EUR".
    pub pair: String,
    /// Offset of the display wall-clock zone from UTC, in minutes.
    pub display_utc_offset_minutes: i32,
    /// Trailing-edge debounce interval for the autoscale controllers.
    /// Must be non-zero so bursts of pan/zoom events coalesce.
    pub autoscale_debounce_ms: u64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            csv_path: "data/data.csv".to_string(),
            pair: "BTC/EUR".to_string(),
            display_utc_offset_minutes: 0,
            autoscale_debounce_ms: 100,
        }
    }
}

impl ChartSettings {
    pub fn display_offset(&self) -> Result<FixedOffset, EngineError> {
        FixedOffset::east_opt(self.display_utc_offset_minutes * 60).ok_or_else(|| {
            EngineError::ConfigError(format!(
                "display offset {} minutes is out of range",
                self.display_utc_offset_minutes
            ))
        })
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.autoscale_debounce_ms == 0 {
            return Err(EngineError::ConfigError(
                "autoscale_debounce_ms must be greater than 0".to_string(),
            ));
        }
        self.display_offset()?;
        Ok(())
    }
}
