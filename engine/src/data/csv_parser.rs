use csv::{ReaderBuilder, StringRecord};
use shared::models::Candle;
use shared::utils::epoch_seconds_to_utc;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::error::EngineError;

pub struct FeedCsvParser;

impl FeedCsvParser {
    // CSV Header: timestamp,pair,open,high,low,close,volume
    // Example Row: 1600000000,BTC/EUR,9120.5,9131.0,9118.2,9127.4,12.84
    pub fn load_candles_from_csv(file_path: &Path) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut candles = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            // Line 1 is the header, so data rows start at line 2.
            let line = idx + 2;
            let record = result?;

            let secs: i64 = Self::parse_field(&record, &headers, "timestamp", line)?;
            let timestamp = epoch_seconds_to_utc(secs).ok_or_else(|| {
                EngineError::CsvDataFormatError(format!(
                    "Timestamp {} at line {} is out of range",
                    secs, line
                ))
            })?;

            candles.push(Candle {
                timestamp,
                pair: Self::get_field(&record, &headers, "pair", line)?.to_string(),
                open: Self::parse_field(&record, &headers, "open", line)?,
                high: Self::parse_field(&record, &headers, "high", line)?,
                low: Self::parse_field(&record, &headers, "low", line)?,
                close: Self::parse_field(&record, &headers, "close", line)?,
                volume: Self::parse_field(&record, &headers, "volume", line)?,
            });
        }
        Ok(candles)
    }

    // Field lookup by header name, so column order in the feed is free.
    fn get_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str, EngineError> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
            .ok_or_else(|| {
                EngineError::CsvDataFormatError(format!(
                    "Missing '{}' field in CSV record at line {}",
                    name, line
                ))
            })
    }

    fn parse_field<T: FromStr>(
        record: &StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<T, EngineError>
    where
        T::Err: std::fmt::Display,
    {
        let raw = Self::get_field(record, headers, name, line)?;
        raw.trim().parse::<T>().map_err(|e| {
            EngineError::CsvDataFormatError(format!(
                "Error parsing '{}' value '{}' at line {}: {}",
                name, raw, line, e
            ))
        })
    }
}
