#![allow(dead_code)]

//! Test infrastructure for nx-server API tests

use nx_server::{AppState, ShutdownCoordinator, build_router};

use axum_test::{TestServer, TestWebSocket};
use http_body_util::BodyExt;

pub const ALICE: &str = "1";
pub const BOB: &str = "2";

/// AppState over default configuration
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with(nx_config::Config::default())
}

pub fn create_test_app_state_with(config: nx_config::Config) -> AppState {
    AppState::from_config(&config, ShutdownCoordinator::new())
        .expect("Failed to build test app state")
}

/// Config whose broker keeps only `queue_capacity` events per stream
pub fn config_with_broker(queue_capacity: usize, max_subscribers: usize) -> nx_config::Config {
    let mut config = nx_config::Config::default();
    config.broker.queue_capacity = queue_capacity;
    config.broker.max_subscribers = max_subscribers;
    config
}

/// Real-socket test server, required for WebSocket tests
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(build_router(state))
        .expect("Failed to create test server")
}

/// Open the user stream for `account_id`
pub async fn connect_stream(server: &TestServer, account_id: &str) -> TestWebSocket {
    server
        .get_websocket("/api/v1/streaming/user")
        .add_header("X-Account-Id", account_id)
        .await
        .into_websocket()
        .await
}

/// Collect a oneshot response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
