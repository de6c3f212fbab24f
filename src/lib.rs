//! Health/status API and the client that consumes it.
//!
//! The server answers `GET /api/health` with a fresh [`StatusSnapshot`]:
//!
//! ```text
//! {
//!   "message": "API is running successfully!",
//!   "timestamp": "2024-01-01T00:00:00Z",
//!   "environment": "Development",
//!   "version": "1.0.0"
//! }
//! ```
//!
//! The client fetches it and tracks the outcome as one of
//! `Loading`, `Loaded(snapshot)` or `Failed(message)`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`status`]: Snapshot construction
//! - [`api`]: HTTP API (health, sample data, Swagger, metrics)
//! - [`client`]: Fetch state machine, transports and rendering
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod status;
pub mod utils;

pub use client::{FetchState, StatusClient, StatusReport};
pub use config::Config;
pub use error::{AppError, FetchError, Result};
pub use status::{StatusReporter, StatusSnapshot};
