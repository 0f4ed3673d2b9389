//! Route table of the statistics service.
//!
//! ```text
//! POST /hit      record one request hit
//! GET  /stats    aggregate view counts over a time range
//! GET  /health   liveness and database status
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hit", post(handlers::record_hit))
        .route("/stats", get(handlers::get_stats))
        .route("/health", get(handlers::health_check))
}
