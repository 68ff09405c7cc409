//! ISO-8601 timestamp serialization.
//!
//! Persisted timestamps use millisecond precision with a `Z` suffix
//! (`2024-01-01T00:00:00.000Z`), the format browsers emit from
//! `Date.toISOString()`. Any RFC 3339 string is accepted on input.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// Format a timestamp as ISO-8601 with milliseconds.
pub fn to_iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_iso(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimestampError::Empty);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TimestampError::Invalid(format!("{}: {}", s, e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Timestamp is empty")]
    Empty,
    #[error("Invalid ISO-8601 timestamp: {0}")]
    Invalid(String),
}

/// Serde adapter for `Option<DateTime<Utc>>` fields.
pub mod iso_millis_option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&to_iso_millis(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse_iso(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
