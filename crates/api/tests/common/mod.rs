#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use toybox_api::config::{CorsOrigins, ServerConfig};
use toybox_api::router::build_app_router;
use toybox_api::state::AppState;
use toybox_db::memory::MemoryToyStore;
use toybox_db::DbConfig;

/// Build a test `ServerConfig` with safe defaults.
///
/// Admits any CORS origin (the production default) and uses a 30-second
/// request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        database: DbConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "toys".to_string(),
            password: "toys".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
    }
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same builder as `main.rs` so integration tests exercise the
/// production middleware stack.
pub fn build_test_app(store: Arc<MemoryToyStore>) -> Router {
    let config = test_config();
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// POST a toy and return its assigned id.
pub async fn add_toy(app: Router, toy: serde_json::Value) -> String {
    let response = post_json(app, "/addToys", toy).await;
    let json = body_json(response).await;
    json["insertedId"].as_str().unwrap().to_string()
}
