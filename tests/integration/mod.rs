//! Integration tests for the status API and client.
//!
//! Each test binds a real server on an ephemeral loopback port and drives it
//! with the reqwest-backed client.
//! Run with: cargo test --test integration

use std::net::SocketAddr;

use axum::{http::StatusCode, routing::get, Router};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

use status_demo::api::{create_router, ApiState};
use status_demo::client::{FetchState, StatusClient};
use status_demo::config::{ClientConfig, Config};
use status_demo::status::{StatusReporter, API_VERSION, STATUS_MESSAGE};

/// Serve `router` on 127.0.0.1:0 and return the base URL.
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Spawn the real API with the given environment name.
async fn spawn_api(environment: &str) -> String {
    let config = Config {
        app_environment: environment.to_string(),
        ..Config::default()
    };
    let state = ApiState::new(StatusReporter::new(config.reporter_config()));
    spawn(create_router(state, &config)).await
}

fn client_for(base_url: &str) -> StatusClient<status_demo::client::HttpTransport> {
    StatusClient::http(ClientConfig {
        api_url: base_url.to_string(),
        ..ClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn client_loads_live_snapshot() {
    let base_url = spawn_api("Integration").await;
    let client = client_for(&base_url);

    let before = time::OffsetDateTime::now_utc();
    client.fetch_default().await;
    let after = time::OffsetDateTime::now_utc();

    let state = client.state();
    let snapshot = state.snapshot().expect("expected loaded state");

    assert_eq!(snapshot.message, STATUS_MESSAGE);
    assert_eq!(snapshot.environment, "Integration");
    assert_eq!(snapshot.version, API_VERSION);
    let timestamp = snapshot.timestamp_utc().expect("readable timestamp");
    assert!(timestamp >= before && timestamp <= after);
    assert!(snapshot.timestamp.ends_with('Z'));
}

#[tokio::test]
async fn successive_fetches_have_non_decreasing_timestamps() {
    let base_url = spawn_api("Integration").await;
    let client = client_for(&base_url);

    client.fetch_default().await;
    let first = client.state().snapshot().cloned().unwrap();

    client.retry().await;
    let second = client.state().snapshot().cloned().unwrap();

    assert!(second.timestamp_utc().unwrap() >= first.timestamp_utc().unwrap());
    assert_eq!(first.environment, second.environment);
    assert_eq!(first.version, second.version);
}

#[tokio::test]
async fn server_error_becomes_failed_with_code() {
    let router = Router::new().route(
        "/api/health",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn(router).await;
    let client = client_for(&base_url);

    client.fetch_default().await;

    let message = client.state().error().map(str::to_string).unwrap();
    assert!(message.contains("500"), "unexpected message: {message}");
}

#[tokio::test]
async fn non_json_body_becomes_parse_failure() {
    let router = Router::new().route("/api/health", get(|| async { "definitely not json" }));
    let base_url = spawn(router).await;
    let client = client_for(&base_url);

    client.fetch_default().await;

    let message = client.state().error().map(str::to_string).unwrap();
    assert!(message.starts_with("failed to parse status response"));
}

#[tokio::test]
async fn unreachable_server_becomes_transport_failure() {
    // Bind then drop to get a port that is (almost certainly) closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    client.fetch_default().await;

    match client.state() {
        FetchState::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn retry_recovers_after_server_starts() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base_url = format!("http://{}", addr);
    let client = client_for(&base_url);

    client.fetch_default().await;
    assert!(client.state().error().is_some());

    // Start the API on the same port and retry.
    let config = Config {
        app_environment: "Recovered".to_string(),
        ..Config::default()
    };
    let listener = TcpListener::bind(addr).await.unwrap();
    let router = create_router(
        ApiState::new(StatusReporter::new(config.reporter_config())),
        &config,
    );
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    client.retry().await;

    let state = client.state();
    assert_eq!(state.snapshot().map(|s| s.environment.as_str()), Some("Recovered"));
}
