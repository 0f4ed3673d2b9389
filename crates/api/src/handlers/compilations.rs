//! Handlers for event compilations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use ewm_core::error::CoreError;
use ewm_core::types::DbId;
use ewm_db::models::compilation::{
    Compilation, CompilationDto, NewCompilationDto, UpdateCompilationRequest,
};
use ewm_db::repositories::{CompilationRepo, EventRepo};

use crate::error::AppResult;
use crate::handlers::events::to_short_dtos;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Verify every referenced event exists.
async fn ensure_events_exist(state: &AppState, ids: &[DbId]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let records = EventRepo::records_by_ids(&state.pool, ids).await?;
    for &id in ids {
        if !records.iter().any(|r| r.id == id) {
            return Err(CoreError::NotFound { entity: "Event", id }.into());
        }
    }
    Ok(())
}

/// Assemble the DTO with the compilation's member events.
async fn to_dto(state: &AppState, compilation: Compilation) -> AppResult<CompilationDto> {
    let ids = CompilationRepo::event_ids(&state.pool, compilation.id).await?;
    let records = EventRepo::records_by_ids(&state.pool, &ids).await?;
    Ok(CompilationDto {
        id: compilation.id,
        title: compilation.title,
        pinned: compilation.pinned,
        events: to_short_dtos(state, records).await,
    })
}

/// POST /admin/compilations
pub async fn create_compilation(
    State(state): State<AppState>,
    Json(input): Json<NewCompilationDto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_events_exist(&state, &input.events).await?;
    let compilation = CompilationRepo::create(&state.pool, &input).await?;

    tracing::info!(compilation_id = compilation.id, title = %compilation.title, "Compilation created");

    let dto = to_dto(&state, compilation).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

/// PATCH /admin/compilations/{id}
pub async fn update_compilation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompilationRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(events) = &input.events {
        ensure_events_exist(&state, events).await?;
    }
    let compilation = CompilationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Compilation", id })?;

    let dto = to_dto(&state, compilation).await?;
    Ok(Json(dto))
}

/// DELETE /admin/compilations/{id}
pub async fn delete_compilation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = CompilationRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(CoreError::NotFound { entity: "Compilation", id }.into());
    }

    tracing::info!(compilation_id = id, "Compilation deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ListCompilationsParams {
    pub pinned: Option<bool>,
}

/// GET /compilations
pub async fn list_compilations(
    State(state): State<AppState>,
    Query(params): Query<ListCompilationsParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = pagination.page()?;
    let compilations =
        CompilationRepo::list(&state.pool, params.pinned, page.offset, page.limit).await?;
    let mut dtos = Vec::with_capacity(compilations.len());
    for compilation in compilations {
        dtos.push(to_dto(&state, compilation).await?);
    }

    Ok(Json(dtos))
}

/// GET /compilations/{id}
pub async fn get_compilation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let compilation = CompilationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Compilation", id })?;

    let dto = to_dto(&state, compilation).await?;
    Ok(Json(dto))
}
