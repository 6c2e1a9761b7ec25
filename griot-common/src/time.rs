//! Timestamp utilities
//!
//! Timestamps are stored as INTEGER unix milliseconds in SQLite so that the
//! feed's `ORDER BY created_at DESC` has exact, driver-independent semantics.
//! The Rust side exposes them as `chrono::DateTime<Utc>`.

use chrono::{DateTime, Utc};

/// Current time as unix milliseconds, the database column representation
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a stored unix-millisecond column value back to a UTC timestamp.
///
/// Out-of-range values (beyond what chrono can represent) collapse to the
/// unix epoch rather than failing the whole row.
pub fn from_unix_ms(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_current() {
        let before = Utc::now().timestamp_millis();
        let ms = now_ms();
        let after = Utc::now().timestamp_millis();
        assert!(before <= ms && ms <= after);
    }

    #[test]
    fn test_ms_round_trip() {
        let ms = 1_700_000_000_123_i64;
        let dt = from_unix_ms(ms);
        assert_eq!(dt.timestamp_millis(), ms);
    }

    #[test]
    fn test_from_unix_ms_zero() {
        let dt = from_unix_ms(0);
        assert_eq!(dt, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_from_unix_ms_out_of_range() {
        // chrono cannot represent i64::MAX milliseconds; collapse to epoch
        let dt = from_unix_ms(i64::MAX);
        assert_eq!(dt, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_ordering_preserved() {
        let earlier = from_unix_ms(1_000);
        let later = from_unix_ms(1_001);
        assert!(later > earlier);
    }
}
