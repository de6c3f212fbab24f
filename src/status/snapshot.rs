//! Point-in-time status snapshots.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::config::ReporterConfig;

/// Message carried by every snapshot.
pub const STATUS_MESSAGE: &str = "API is running successfully!";

/// API version reported by the health endpoint.
pub const API_VERSION: &str = "1.0.0";

/// Server status at the moment a request was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "message": "API is running successfully!",
    "timestamp": "2024-01-01T00:00:00Z",
    "environment": "Development",
    "version": "1.0.0"
}))]
pub struct StatusSnapshot {
    /// Human-readable status line.
    pub message: String,
    /// UTC generation time, RFC 3339.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: OffsetDateTime,
    /// Running environment name.
    pub environment: String,
    /// API version.
    pub version: String,
}

/// Builds [`StatusSnapshot`]s from the process configuration and the wall clock.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    config: ReporterConfig,
}

impl StatusReporter {
    /// Create a reporter for the given configuration.
    pub fn new(config: ReporterConfig) -> Self {
        Self { config }
    }

    /// Environment name this reporter reports.
    pub fn environment(&self) -> &str {
        &self.config.environment
    }

    /// Snapshot of the current state. Never fails.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.snapshot_at(OffsetDateTime::now_utc())
    }

    /// Snapshot stamped with `now`, normalized to UTC.
    pub fn snapshot_at(&self, now: OffsetDateTime) -> StatusSnapshot {
        StatusSnapshot {
            message: STATUS_MESSAGE.to_string(),
            timestamp: now.to_offset(time::UtcOffset::UTC),
            environment: self.config.environment.clone(),
            version: API_VERSION.to_string(),
        }
    }
}
