//! Handlers for admin user management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use ewm_core::error::CoreError;
use ewm_core::types::DbId;
use ewm_db::models::user::NewUserRequest;
use ewm_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::query::{parse_id_list, PaginationParams};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    pub ids: Option<String>,
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let user = UserRepo::create(&state.pool, &input).await?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let ids = parse_id_list(params.ids.as_deref())?;
    let page = pagination.page()?;
    let users = UserRepo::list(&state.pool, ids.as_deref(), page.offset, page.limit).await?;

    Ok(Json(users))
}

/// DELETE /admin/users/{id}
///
/// Refuses to delete a user who still initiates events, holds requests,
/// or authored comments.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }
    if UserRepo::is_referenced(&state.pool, id).await? {
        return Err(CoreError::Conflict(
            "Cannot delete a user who still has events, requests, or comments".into(),
        )
        .into());
    }
    UserRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
