use std::sync::Arc;

use crate::config::ServerConfig;
use crate::DbPool;

/// Shared application state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}
