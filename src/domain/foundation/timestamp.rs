//! Timestamp value object for immutable points in time.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used for timestamps in the feedback log.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment, truncated to whole seconds.
    ///
    /// The log only stores second precision, so truncating here keeps a
    /// freshly recorded entry equal to the same entry read back.
    pub fn now() -> Self {
        let now = Utc::now();
        Self::from_unix_secs(now.timestamp())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Creates a timestamp from Unix seconds.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Formats the timestamp the way the feedback log stores it.
    pub fn to_log_string(&self) -> String {
        self.0.format(LOG_TIMESTAMP_FORMAT).to_string()
    }

    /// Parses a timestamp written by [`Timestamp::to_log_string`].
    pub fn parse_log_string(value: &str) -> Result<Self, chrono::ParseError> {
        let naive = NaiveDateTime::parse_from_str(value.trim(), LOG_TIMESTAMP_FORMAT)?;
        Ok(Self(naive.and_utc()))
    }

    /// Compact date stamp (`YYYYMMDD`) for export file names.
    pub fn date_stamp(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_log_string())
    }
}
