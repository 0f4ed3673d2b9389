//! Handlers for category management and public category lookups.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use ewm_core::error::CoreError;
use ewm_core::types::DbId;
use ewm_db::models::category::NewCategoryDto;
use ewm_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<NewCategoryDto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /admin/categories/{id}
pub async fn rename_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NewCategoryDto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let category = CategoryRepo::rename(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Category", id })?;

    Ok(Json(category))
}

/// DELETE /admin/categories/{id}
///
/// Refuses to delete a category that events still reference.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if CategoryRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "Category", id }.into());
    }
    if CategoryRepo::has_events(&state.pool, id).await? {
        return Err(CoreError::Conflict("The category is not empty".into()).into());
    }
    CategoryRepo::delete(&state.pool, id).await?;

    tracing::info!(category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page()?;
    let categories = CategoryRepo::list(&state.pool, page.offset, page.limit).await?;

    Ok(Json(categories))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Category", id })?;

    Ok(Json(category))
}
