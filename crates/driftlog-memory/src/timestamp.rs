//! Local wall-clock timestamps stored as ISO-8601 text.

use chrono::{DateTime, Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::SystemTime;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const SPACED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Error returned when a timestamp string is not ISO-8601.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {0:?}")]
pub struct TimestampError(pub String);

/// Local time without offset, microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local time.
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Wrap a naive local time, truncated to microseconds.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let micros = value.nanosecond() / 1_000 * 1_000;
        Self(value.with_nanosecond(micros).unwrap_or(value))
    }

    /// Convert a filesystem time into local wall-clock time.
    pub fn from_system_time(value: SystemTime) -> Self {
        Self::from_naive(DateTime::<Local>::from(value).naive_local())
    }

    /// Parse ISO-8601 text, with or without an offset.
    ///
    /// Offsets are converted to local time.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        let trimmed = value.trim();
        for format in [ISO_FORMAT, SPACED_FORMAT] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::from_naive(parsed));
            }
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|parsed| Self::from_naive(parsed.with_timezone(&Local).naive_local()))
            .map_err(|_| TimestampError(value.to_string()))
    }

    /// The underlying naive local time.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// This instant shifted back by whole days.
    pub fn days_before(&self, days: u32) -> Self {
        Self(self.0 - Duration::days(i64::from(days)))
    }

    /// Format with a custom chrono pattern.
    pub fn format(&self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
