//! Handlers for hit recording and view aggregation.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use ewm_core::error::CoreError;
use ewm_core::stats::{is_valid_ip, is_valid_uri, validate_range, validate_uris};
use ewm_core::time;

use crate::error::{AppError, AppResult};
use crate::models::HitDto;
use crate::repo::StatRepo;
use crate::state::AppState;

/// POST /hit
pub async fn record_hit(
    State(state): State<AppState>,
    Json(hit): Json<HitDto>,
) -> AppResult<impl IntoResponse> {
    if hit.app.trim().is_empty() {
        return Err(CoreError::Validation("app must not be blank".into()).into());
    }
    if !is_valid_uri(&hit.uri) {
        return Err(CoreError::Validation(format!("Invalid uri: {}", hit.uri)).into());
    }
    if !is_valid_ip(&hit.ip) {
        return Err(CoreError::Validation(format!("Invalid ip: {}", hit.ip)).into());
    }

    StatRepo::insert_hit(&state.pool, &hit).await?;

    tracing::debug!(app = %hit.app, uri = %hit.uri, "Hit recorded");

    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub uris: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

/// GET /stats
pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> AppResult<impl IntoResponse> {
    let start = params
        .start
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("start is required".into()))?;
    let end = params
        .end
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("end is required".into()))?;
    let start = time::parse_date_time(start)?;
    let end = time::parse_date_time(end)?;
    validate_range(start, end)?;

    // Blank entries fail URI validation rather than being skipped.
    let uris: Option<Vec<String>> = params.uris.as_deref().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .collect()
    });
    if let Some(list) = &uris {
        validate_uris(list)?;
    }

    let rows = StatRepo::aggregate(&state.pool, start, end, uris.as_deref(), params.unique).await?;

    Ok(Json(rows))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match crate::health_check(&state.pool).await {
        Ok(()) => "up",
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            "down"
        }
    };

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
