//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go through `tower::ServiceExt::oneshot` against the same router
//! (middleware included) that production uses. The stats base URL points at
//! an unbound local port, exercising the degrade-to-zero-views path.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ewm_api::config::ServerConfig;
use ewm_api::router::build_app_router;
use ewm_api::state::AppState;
use ewm_api::stats_client::StatsClient;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        stats_base_url: "http://127.0.0.1:1".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_stats(pool, &test_config().stats_base_url)
}

/// Build the router against an explicit stats service URL, for tests that
/// run a stats stub.
pub fn build_test_app_with_stats(pool: PgPool, stats_url: &str) -> Router {
    let mut config = test_config();
    config.stats_base_url = stats_url.to_string();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        stats: StatsClient::new(config.stats_base_url.clone()),
    };
    build_app_router(state, &config)
}

/// Serve fixed stats rows on an ephemeral port and return the base URL.
pub async fn spawn_stats_stub(rows: serde_json::Value) -> String {
    let app = Router::new().route(
        "/stats",
        axum::routing::get(move || {
            let rows = rows.clone();
            async move { axum::Json(rows) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(json)).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user over HTTP and return its ID.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/admin/users",
        serde_json::json!({"name": name, "email": email}),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a category over HTTP and return its ID.
pub async fn seed_category(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/admin/categories",
        serde_json::json!({"name": name}),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// A valid event creation payload starting far in the future.
pub fn event_payload(category: i64) -> serde_json::Value {
    serde_json::json!({
        "annotation": "An evening of live music in the city park",
        "category": category,
        "description": "Bring a blanket and enjoy two hours of acoustic sets",
        "eventDate": "2035-07-01 19:00:00",
        "location": {"lat": 55.75, "lon": 37.62},
        "paid": false,
        "participantLimit": 0,
        "requestModeration": true,
        "title": "Music in the park"
    })
}

/// Create an event for the initiator and return its ID.
pub async fn seed_event(pool: &PgPool, initiator: i64, category: i64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/users/{initiator}/events"),
        event_payload(category),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Publish a pending event through the admin endpoint.
pub async fn publish_event(pool: &PgPool, event_id: i64) {
    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/admin/events/{event_id}"),
        serde_json::json!({"stateAction": "PUBLISH_EVENT"}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
