//! Server-side status reporting.

pub mod snapshot;

pub use snapshot::{StatusReporter, StatusSnapshot, API_VERSION, STATUS_MESSAGE};
