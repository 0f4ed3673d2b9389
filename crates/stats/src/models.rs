//! Wire and row types of the statistics service.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ewm_core::time::date_format;
use ewm_core::types::Timestamp;

/// Payload of `POST /hit`: one recorded request.
#[derive(Debug, Clone, Deserialize)]
pub struct HitDto {
    pub app: String,
    pub uri: String,
    pub ip: String,
    #[serde(with = "date_format")]
    pub timestamp: Timestamp,
}

/// One aggregation row of `GET /stats`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ViewStats {
    pub app: String,
    pub uri: String,
    pub hits: i64,
}
