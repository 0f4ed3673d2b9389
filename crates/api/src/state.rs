use std::sync::Arc;

use crate::config::ServerConfig;
use crate::stats_client::StatsClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ewm_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the companion stats service.
    pub stats: StatsClient,
}
