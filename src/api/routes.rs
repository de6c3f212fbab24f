//! HTTP API route definitions.

use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_PATH};
use super::handlers::{data, health, metrics_text, root, ApiState};
use crate::config::Config;

/// Create the API router.
pub fn create_router(state: ApiState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        // Health endpoint
        .route("/api/health", get(health))
        // Sample data endpoint
        .route("/api/data", get(data))
        .route("/metrics", get(metrics_text));

    if config.is_development() {
        info!("Swagger UI enabled at {}", SWAGGER_PATH);
        router = router.merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));
    }

    router
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the frontend origins.
///
/// Credentials are allowed, so methods and headers mirror the request
/// instead of using a wildcard.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    use crate::config::ReporterConfig;
    use crate::status::{StatusReporter, StatusSnapshot};

    fn test_config(environment: &str) -> Config {
        Config {
            app_environment: environment.to_string(),
            ..Config::default()
        }
    }

    fn app(environment: &str) -> Router {
        let config = test_config(environment);
        let state = ApiState::new(StatusReporter::new(ReporterConfig {
            environment: environment.to_string(),
        }));
        create_router(state, &config)
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn health_endpoint_returns_snapshot() {
        let response = app("Test")
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let snapshot: StatusSnapshot = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(snapshot.environment, "Test");
        assert_eq!(snapshot.version, "1.0.0");
        assert_eq!(snapshot.message, "API is running successfully!");
    }

    #[tokio::test]
    async fn data_endpoint_returns_three_items() {
        let response = app("Test")
            .oneshot(Request::builder().uri("/api/data").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let response = app("Test")
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["status"], "Running");
        assert_eq!(json["endpoints"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn swagger_only_in_development() {
        let response = app("Development")
            .oneshot(Request::builder().uri(OPENAPI_JSON_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app("Production")
            .oneshot(Request::builder().uri(OPENAPI_JSON_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let response = app("Test")
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn cors_rejects_unknown_origin() {
        let response = app("Test")
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn cors_preflight_mirrors_method() {
        let response = app("Test")
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/health")
                    .header(header::ORIGIN, "https://webapp.local")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET"
        );
    }

    #[tokio::test]
    async fn metrics_endpoint_404_without_recorder() {
        let response = app("Test")
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_with_recorder() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = ApiState::new(StatusReporter::new(ReporterConfig {
            environment: "Test".to_string(),
        }))
        .with_metrics(recorder.handle());
        let app = create_router(state, &test_config("Test"));

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
