//! The `time` attribute

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use std::fmt;

use crate::error::EnvelopeError;

/// An RFC 3339 timestamp that remembers how it was written.
///
/// Encoding emits the text exactly as received, so the offset and the
/// fractional-second precision of an inbound event survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTime {
    parsed: DateTime<FixedOffset>,
    raw: String,
}

impl EventTime {
    /// Parse an RFC 3339 timestamp.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let parsed = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| EnvelopeError::invalid("time", e))?;
        Ok(Self {
            parsed,
            raw: raw.to_string(),
        })
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.parsed
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.parsed.with_timezone(&Utc)
    }

    /// The timestamp as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(time: DateTime<Utc>) -> Self {
        Self {
            parsed: time.fixed_offset(),
            raw: time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
