//! A calendar-date leaf type, carried as tag 1 ("date") over a Unix
//! timestamp. Not part of the minimal spec value model, but every envelope
//! leaf in practice needs a date type, so it rides along as an ordinary tagged
//! value rather than a special case in the codec.

use chrono::{DateTime, TimeZone, Utc};

/// A point in time, represented internally as a Unix timestamp (seconds,
/// possibly fractional).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Date(DateTime<Utc>);

impl Date {
    pub fn from_timestamp(seconds: f64) -> Self {
        let secs = seconds.trunc() as i64;
        let nanos = ((seconds.fract()) * 1e9).round() as u32;
        Self(Utc.timestamp_opt(secs, nanos).single().unwrap_or_else(|| {
            Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
        }))
    }

    pub fn timestamp(&self) -> f64 {
        self.0.timestamp() as f64
            + (self.0.timestamp_subsec_nanos() as f64) / 1e9
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
