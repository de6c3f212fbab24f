//! Status payload as the client receives it.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::status::StatusSnapshot;

/// Client view of a health response.
///
/// Only the shape is checked: all four fields must be strings. The timestamp
/// is kept verbatim and interpreted on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Human-readable status line.
    pub message: String,
    /// Server timestamp, as sent.
    pub timestamp: String,
    /// Running environment name.
    pub environment: String,
    /// API version.
    pub version: String,
}

impl StatusReport {
    /// Timestamp as a UTC instant, if it is readable ISO 8601.
    ///
    /// A timestamp without an offset is taken to be UTC.
    pub fn timestamp_utc(&self) -> Option<OffsetDateTime> {
        let raw = self.timestamp.trim();

        OffsetDateTime::parse(raw, &Rfc3339)
            .or_else(|_| OffsetDateTime::parse(raw, &Iso8601::DEFAULT))
            .or_else(|_| PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).map(|t| t.assume_utc()))
            .ok()
            .map(|t| t.to_offset(UtcOffset::UTC))
    }
}

impl From<StatusSnapshot> for StatusReport {
    fn from(snapshot: StatusSnapshot) -> Self {
        let timestamp = snapshot
            .timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| snapshot.timestamp.to_string());

        Self {
            message: snapshot.message,
            timestamp,
            environment: snapshot.environment,
            version: snapshot.version,
        }
    }
}
