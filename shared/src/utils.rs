// Time helpers shared between the engine and any consumer of the published
// dataset.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Converts integer seconds since the Unix epoch into a UTC instant.
/// Returns `None` for values outside chrono's representable range.
pub fn epoch_seconds_to_utc(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Converts a UTC instant to display wall-clock time and discards the zone
/// metadata. The chart only ever plots naive local instants.
pub fn to_display_time(ts: DateTime<Utc>, display_offset: FixedOffset) -> NaiveDateTime {
    ts.with_timezone(&display_offset).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_epoch_seconds_round_trip() {
        let ts = epoch_seconds_to_utc(1_600_000_000).unwrap();
        assert_eq!(ts.timestamp(), 1_600_000_000);
    }

    #[test]
    fn test_epoch_seconds_out_of_range() {
        assert!(epoch_seconds_to_utc(i64::MAX).is_none());
    }

    #[test]
    fn test_display_conversion_applies_offset() {
        let ts = epoch_seconds_to_utc(1_600_000_000).unwrap(); // 2020-09-13 12:26:40 UTC
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let local = to_display_time(ts, plus_one);
        assert_eq!(local.hour(), 13);
        assert_eq!(local.minute(), 26);
    }

    #[test]
    fn test_display_conversion_utc_is_identity() {
        let ts = epoch_seconds_to_utc(1_600_000_000).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(to_display_time(ts, utc), ts.naive_utc());
    }
}
