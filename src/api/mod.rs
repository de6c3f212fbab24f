//! HTTP API module for health, sample data, docs and metrics endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::status::StatusReporter;
use crate::utils::shutdown_signal;

pub use docs::ApiDoc;
pub use handlers::ApiState;
pub use routes::create_router;

/// Bind `0.0.0.0:<port>` and serve the API until a shutdown signal arrives.
pub async fn serve(config: &Config, metrics: Option<PrometheusHandle>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    serve_on(listener, config, metrics).await
}

/// Serve the API on an already-bound listener.
pub async fn serve_on(
    listener: TcpListener,
    config: &Config,
    metrics: Option<PrometheusHandle>,
) -> Result<()> {
    let mut state = ApiState::new(StatusReporter::new(config.reporter_config()));
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }

    let router = create_router(state, config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}
