//! Handlers for comments: author CRUD, public listings, and admin
//! moderation (soft hide).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Duration;
use serde::Deserialize;
use validator::Validate;

use ewm_core::error::CoreError;
use ewm_core::event_state::EventState;
use ewm_core::time;
use ewm_core::types::DbId;
use ewm_db::models::comment::{
    AdminCommentFilter, CommentDto, CommentRecord, CommentSort, NewCommentDto,
};
use ewm_db::repositories::{CommentRepo, EventRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::query::{parse_id_list, PaginationParams};
use crate::state::AppState;

/// Default lookback window of the admin search when `rangeStart` is absent.
const DEFAULT_LOOKBACK_SECS: i64 = 10;

fn into_dtos(rows: Vec<CommentRecord>) -> Vec<CommentDto> {
    rows.into_iter().map(|r| r.into_dto()).collect()
}

/// Fetch a comment and verify the caller authored it.
async fn owned_comment(
    state: &AppState,
    user_id: DbId,
    comment_id: DbId,
) -> AppResult<CommentRecord> {
    let record = CommentRepo::find_record(&state.pool, comment_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Comment", id: comment_id })?;
    if record.author_id != user_id {
        return Err(CoreError::Forbidden("Comment belongs to another user".into()).into());
    }
    Ok(record)
}

// ---------------------------------------------------------------------------
// Author endpoints
// ---------------------------------------------------------------------------

/// POST /users/{userId}/comments/{eventId}
pub async fn create_comment(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(DbId, DbId)>,
    Json(input): Json<NewCommentDto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "User", id: user_id }.into());
    }
    let event = EventRepo::find_record(&state.pool, event_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;
    if event.state != EventState::Published {
        return Err(
            CoreError::Conflict("Comments are allowed on published events only".into()).into(),
        );
    }

    let record =
        CommentRepo::create(&state.pool, event_id, user_id, &input.text, time::now()).await?;

    tracing::info!(comment_id = record.id, event_id, author_id = user_id, "Comment created");

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// PATCH /users/{userId}/comments/{commentId}
pub async fn update_comment(
    State(state): State<AppState>,
    Path((user_id, comment_id)): Path<(DbId, DbId)>,
    Json(input): Json<NewCommentDto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    owned_comment(&state, user_id, comment_id).await?;
    let record = CommentRepo::update_text(&state.pool, comment_id, &input.text).await?;

    Ok(Json(record.into_dto()))
}

/// DELETE /users/{userId}/comments/{commentId}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((user_id, comment_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    owned_comment(&state, user_id, comment_id).await?;
    CommentRepo::delete(&state.pool, comment_id).await?;

    tracing::info!(comment_id, author_id = user_id, "Comment deleted by author");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{userId}/comments/{commentId}
pub async fn get_own_comment(
    State(state): State<AppState>,
    Path((user_id, comment_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let record = owned_comment(&state, user_id, comment_id).await?;

    Ok(Json(record.into_dto()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOwnCommentsParams {
    pub event_id: Option<DbId>,
}

/// GET /users/{userId}/comments
pub async fn list_own_comments(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(params): Query<ListOwnCommentsParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "User", id: user_id }.into());
    }
    let page = pagination.page()?;
    let rows = CommentRepo::list_by_author(
        &state.pool,
        user_id,
        params.event_id,
        page.offset,
        page.limit,
    )
    .await?;

    Ok(Json(into_dtos(rows)))
}

// ---------------------------------------------------------------------------
// Public endpoint
// ---------------------------------------------------------------------------

/// GET /events/{eventId}/comments
pub async fn list_event_comments(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_published(&state.pool, event_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;
    let page = params.page()?;
    let rows =
        CommentRepo::list_visible_for_event(&state.pool, event_id, page.offset, page.limit).await?;

    Ok(Json(into_dtos(rows)))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// GET /admin/comments/{commentId}
pub async fn admin_get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = CommentRepo::find_record(&state.pool, comment_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Comment", id: comment_id })?;

    Ok(Json(record.into_dto()))
}

/// DELETE /admin/comments/{commentId}
///
/// Soft hide: the row stays but disappears from every listing.
pub async fn admin_hide_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hidden = CommentRepo::hide(&state.pool, comment_id).await?;
    if hidden == 0 {
        return Err(CoreError::NotFound { entity: "Comment", id: comment_id }.into());
    }

    tracing::info!(comment_id, "Comment hidden by admin");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCommentSearchParams {
    pub user_ids: Option<String>,
    pub event_ids: Option<String>,
    pub comment_ids: Option<String>,
    pub text: Option<String>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
    pub sort: Option<String>,
}

/// GET /admin/comments
pub async fn admin_search_comments(
    State(state): State<AppState>,
    Query(params): Query<AdminCommentSearchParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let range_start = match params.range_start.as_deref() {
        Some(raw) => time::parse_date_time(raw)?,
        None => time::now() - Duration::seconds(DEFAULT_LOOKBACK_SECS),
    };
    let range_end = match params.range_end.as_deref() {
        Some(raw) => time::parse_date_time(raw)?,
        None => time::far_future(),
    };
    if range_end < range_start {
        return Err(AppError::BadRequest(
            "rangeEnd must not precede rangeStart".into(),
        ));
    }
    let sort = match params.sort.as_deref() {
        Some(raw) => raw.parse::<CommentSort>()?,
        None => CommentSort::Desc,
    };

    let page = pagination.page()?;
    let filter = AdminCommentFilter {
        user_ids: parse_id_list(params.user_ids.as_deref())?,
        event_ids: parse_id_list(params.event_ids.as_deref())?,
        comment_ids: parse_id_list(params.comment_ids.as_deref())?,
        text: params.text,
        range_start,
        range_end,
        sort,
        offset: page.offset,
        limit: page.limit,
    };
    let rows = CommentRepo::admin_search(&state.pool, &filter).await?;

    Ok(Json(into_dtos(rows)))
}
