//! HTTP API handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::metrics;
use crate::status::{StatusReporter, StatusSnapshot};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Builds the health payload.
    pub reporter: StatusReporter,
    /// Prometheus handle, present when a recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl ApiState {
    /// Create new app state.
    pub fn new(reporter: StatusReporter) -> Self {
        Self {
            reporter,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("reporter", &self.reporter)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// One entry of the sample data listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DataItem {
    /// Item identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Sample data response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse {
    /// Items.
    pub items: Vec<DataItem>,
    /// Number of items.
    pub count: usize,
    /// UTC generation time, RFC 3339.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: OffsetDateTime,
}

/// Service descriptor returned at the root path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name.
    pub service: String,
    /// Web framework.
    pub framework: String,
    /// Implementation language.
    pub language: String,
    /// Run status.
    pub status: String,
    /// Available endpoints with a short description.
    pub endpoints: Vec<String>,
}

/// Health check handler - returns a fresh status snapshot.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is running", body = StatusSnapshot)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<ApiState>) -> Json<StatusSnapshot> {
    metrics::inc_status_requests();
    Json(state.reporter.snapshot())
}

/// Sample data handler.
#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "Sample items", body = DataResponse)
    ),
    tag = "Data"
)]
pub async fn data() -> Json<DataResponse> {
    let items: Vec<DataItem> = [
        (1, "Sample Item 1", "This is a sample item"),
        (2, "Sample Item 2", "Another sample item"),
        (3, "Sample Item 3", "Yet another sample item"),
    ]
    .into_iter()
    .map(|(id, name, description)| DataItem {
        id,
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect();

    Json(DataResponse {
        count: items.len(),
        items,
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// Root handler - describes the service.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service descriptor", body = ServiceInfo)
    ),
    tag = "Root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Sample Web API".to_string(),
        framework: "axum".to_string(),
        language: "Rust".to_string(),
        status: "Running".to_string(),
        endpoints: vec![
            "/api/health - Health check endpoint".to_string(),
            "/api/data - Sample data endpoint".to_string(),
            "/swagger - API documentation".to_string(),
        ],
    })
}

/// Prometheus exposition; 404 when no recorder is installed.
pub async fn metrics_text(State(state): State<ApiState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
