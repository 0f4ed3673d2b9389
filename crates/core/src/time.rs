//! Wire date-time format and range sentinels.
//!
//! Every date that crosses the HTTP boundary uses the fixed
//! `yyyy-MM-dd HH:mm:ss` pattern, both in JSON bodies and query parameters.
//! Participation-request creation times are the one exception and use a
//! microsecond-precision ISO-like pattern (see [`micros_format`]).

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CoreError;
use crate::types::Timestamp;

/// The wire pattern for dates, equivalent to `yyyy-MM-dd HH:mm:ss`.
pub const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Pattern for participation-request creation times
/// (`yyyy-MM-dd'T'HH:mm:ss.SSSSSS`).
pub const MICROS_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Lower sentinel used when a range start is not supplied (2000-01-01).
pub fn earliest() -> Timestamp {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("valid sentinel date")
        .and_hms_opt(0, 0, 0)
        .expect("valid sentinel time")
}

/// Upper sentinel used when a range end is not supplied (3000-01-01).
pub fn far_future() -> Timestamp {
    NaiveDate::from_ymd_opt(3000, 1, 1)
        .expect("valid sentinel date")
        .and_hms_opt(0, 0, 0)
        .expect("valid sentinel time")
}

/// Current wall-clock time, truncated to microseconds so values survive a
/// round trip through a PostgreSQL `TIMESTAMP` column unchanged.
pub fn now() -> Timestamp {
    let now = chrono::Local::now().naive_local();
    let micros = now.and_utc().timestamp_micros();
    chrono::DateTime::from_timestamp_micros(micros)
        .expect("in-range timestamp")
        .naive_utc()
}

/// Parse a wire-format date-time string (`yyyy-MM-dd HH:mm:ss`).
pub fn parse_date_time(value: &str) -> Result<Timestamp, CoreError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_PATTERN)
        .map_err(|_| CoreError::Validation(format!("Invalid date-time value: {value}")))
}

/// Format a timestamp in the wire pattern.
pub fn format_date_time(value: &Timestamp) -> String {
    value.format(DATE_TIME_PATTERN).to_string()
}

/// Serde adapter for mandatory `yyyy-MM-dd HH:mm:ss` fields.
pub mod date_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_TIME_PATTERN;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATE_TIME_PATTERN).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_TIME_PATTERN).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `yyyy-MM-dd HH:mm:ss` fields.
pub mod date_format_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_TIME_PATTERN;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.format(DATE_TIME_PATTERN).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(s) => NaiveDateTime::parse_from_str(&s, DATE_TIME_PATTERN)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Serde adapter for microsecond-precision participation-request times.
pub mod micros_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::MICROS_PATTERN;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(MICROS_PATTERN).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, MICROS_PATTERN).map_err(serde::de::Error::custom)
    }
}
