//! Handlers for event lifecycle: initiator CRUD, admin moderation, and the
//! public, stats-enriched search.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Duration;
use serde::Deserialize;
use validator::Validate;

use ewm_core::error::CoreError;
use ewm_core::event_state::{self, EventState};
use ewm_core::time;
use ewm_core::types::{DbId, Timestamp};
use ewm_db::models::event::{
    AdminEventFilter, EventFullDto, EventPatch, EventRecord, EventShortDto, EventSort,
    NewEventDto, PublicEventFilter, UpdateEventAdminRequest, UpdateEventUserRequest,
};
use ewm_db::repositories::{CategoryRepo, EventRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::query::{parse_enum_list, parse_id_list, PaginationParams};
use crate::state::AppState;
use crate::stats_client::event_uri;

/// Minimum lead time an initiator must leave before the event starts.
const USER_LEAD_TIME_HOURS: i64 = 2;
/// Minimum lead time an admin must leave when rescheduling or publishing.
const ADMIN_LEAD_TIME_HOURS: i64 = 1;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Best-effort client address for hit recording.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

fn ensure_lead_time(event_date: Timestamp, hours: i64) -> AppResult<()> {
    if event_date < time::now() + Duration::hours(hours) {
        return Err(CoreError::Conflict(format!(
            "Event date must be at least {hours} hours in the future"
        ))
        .into());
    }
    Ok(())
}

async fn ensure_user_exists(state: &AppState, id: DbId) -> AppResult<()> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }
    Ok(())
}

async fn ensure_category_exists(state: &AppState, id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "Category", id }.into());
    }
    Ok(())
}

/// Fetch view counts for a batch of records, keyed by event ID.
async fn views_for(state: &AppState, records: &[EventRecord]) -> HashMap<DbId, i64> {
    let uris: Vec<String> = records.iter().map(|r| event_uri(r.id)).collect();
    let by_uri = state.stats.get_views(&uris).await;
    records
        .iter()
        .map(|r| (r.id, by_uri.get(&event_uri(r.id)).copied().unwrap_or(0)))
        .collect()
}

async fn to_full_dto(state: &AppState, record: EventRecord) -> EventFullDto {
    let views = views_for(state, std::slice::from_ref(&record)).await;
    let v = views.get(&record.id).copied().unwrap_or(0);
    record.into_full(v)
}

async fn to_full_dtos(state: &AppState, records: Vec<EventRecord>) -> Vec<EventFullDto> {
    let views = views_for(state, &records).await;
    records
        .into_iter()
        .map(|r| {
            let v = views.get(&r.id).copied().unwrap_or(0);
            r.into_full(v)
        })
        .collect()
}

pub(crate) async fn to_short_dtos(
    state: &AppState,
    records: Vec<EventRecord>,
) -> Vec<EventShortDto> {
    let views = views_for(state, &records).await;
    records
        .into_iter()
        .map(|r| {
            let v = views.get(&r.id).copied().unwrap_or(0);
            r.into_short(v)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Initiator endpoints
// ---------------------------------------------------------------------------

/// POST /users/{userId}/events
pub async fn create_event(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<NewEventDto>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_user_exists(&state, user_id).await?;
    ensure_category_exists(&state, input.category).await?;
    ensure_lead_time(input.event_date, USER_LEAD_TIME_HOURS)?;

    let record = EventRepo::create(&state.pool, user_id, &input, time::now()).await?;

    tracing::info!(event_id = record.id, initiator_id = user_id, "Event created");

    Ok((StatusCode::CREATED, Json(record.into_full(0))))
}

/// GET /users/{userId}/events
pub async fn list_user_events(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    ensure_user_exists(&state, user_id).await?;
    let page = params.page()?;
    let records =
        EventRepo::list_by_initiator(&state.pool, user_id, page.offset, page.limit).await?;

    Ok(Json(to_short_dtos(&state, records).await))
}

/// GET /users/{userId}/events/{eventId}
pub async fn get_user_event(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let record = EventRepo::find_record_of_initiator(&state.pool, event_id, user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;

    Ok(Json(to_full_dto(&state, record).await))
}

/// PATCH /users/{userId}/events/{eventId}
pub async fn update_user_event(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateEventUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let record = EventRepo::find_record_of_initiator(&state.pool, event_id, user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;

    if !event_state::user_may_update(record.state) {
        return Err(CoreError::Conflict(
            "Only pending or canceled events can be changed".into(),
        )
        .into());
    }
    if let Some(date) = input.event_date {
        ensure_lead_time(date, USER_LEAD_TIME_HOURS)?;
    }
    if let Some(category) = input.category {
        ensure_category_exists(&state, category).await?;
    }

    let action = input.state_action;
    let mut patch: EventPatch = input.into();
    if let Some(action) = action {
        patch.state = Some(event_state::apply_user_action(record.state, action)?);
    }

    let updated = EventRepo::apply_patch(&state.pool, event_id, &patch).await?;

    tracing::info!(event_id, initiator_id = user_id, "Event updated by initiator");

    Ok(Json(to_full_dto(&state, updated).await))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSearchParams {
    pub users: Option<String>,
    pub states: Option<String>,
    pub categories: Option<String>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
}

/// GET /admin/events
pub async fn admin_search_events(
    State(state): State<AppState>,
    Query(params): Query<AdminSearchParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let range_start = match params.range_start.as_deref() {
        Some(raw) => time::parse_date_time(raw)?,
        None => time::earliest(),
    };
    let range_end = match params.range_end.as_deref() {
        Some(raw) => time::parse_date_time(raw)?,
        None => time::far_future(),
    };
    let page = pagination.page()?;
    let filter = AdminEventFilter {
        users: parse_id_list(params.users.as_deref())?,
        states: parse_enum_list(params.states.as_deref())?,
        categories: parse_id_list(params.categories.as_deref())?,
        range_start,
        range_end,
        offset: page.offset,
        limit: page.limit,
    };
    let records = EventRepo::admin_search(&state.pool, &filter).await?;

    Ok(Json(to_full_dtos(&state, records).await))
}

/// PATCH /admin/events/{eventId}
pub async fn admin_update_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<UpdateEventAdminRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let record = EventRepo::find_record(&state.pool, event_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;

    if let Some(date) = input.event_date {
        ensure_lead_time(date, ADMIN_LEAD_TIME_HOURS)?;
    }
    if let Some(category) = input.category {
        ensure_category_exists(&state, category).await?;
    }

    let action = input.state_action;
    let effective_date = input.event_date.unwrap_or(record.event_date);
    let mut patch: EventPatch = input.into();
    if let Some(action) = action {
        let next = event_state::apply_admin_action(record.state, action)?;
        if next == EventState::Published {
            ensure_lead_time(effective_date, ADMIN_LEAD_TIME_HOURS)?;
            patch.published_on = Some(time::now());
        }
        patch.state = Some(next);
    }

    let updated = EventRepo::apply_patch(&state.pool, event_id, &patch).await?;

    tracing::info!(event_id, state = %updated.state, "Event updated by admin");

    Ok(Json(to_full_dto(&state, updated).await))
}

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchParams {
    pub text: Option<String>,
    pub categories: Option<String>,
    pub paid: Option<bool>,
    pub range_start: Option<String>,
    pub range_end: Option<String>,
    #[serde(default)]
    pub only_available: bool,
    pub sort: Option<String>,
}

/// GET /events
///
/// Published events only. Without an explicit range, only upcoming events
/// are returned. Each call is recorded as a hit on `/events`.
pub async fn public_search_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PublicSearchParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let range_start = match params.range_start.as_deref() {
        Some(raw) => Some(time::parse_date_time(raw)?),
        None => None,
    };
    let range_end = match params.range_end.as_deref() {
        Some(raw) => time::parse_date_time(raw)?,
        None => time::far_future(),
    };
    let range_start = range_start.unwrap_or_else(time::now);
    if range_end < range_start {
        return Err(AppError::BadRequest(
            "rangeEnd must not precede rangeStart".into(),
        ));
    }
    let sort = match params.sort.as_deref() {
        Some(raw) => Some(raw.parse::<EventSort>()?),
        None => None,
    };

    let page = pagination.page()?;
    let filter = PublicEventFilter {
        text: params.text.clone(),
        categories: parse_id_list(params.categories.as_deref())?,
        paid: params.paid,
        range_start,
        range_end,
        only_available: params.only_available,
        offset: page.offset,
        limit: page.limit,
    };
    let records = EventRepo::public_search(&state.pool, &filter).await?;

    state.stats.record_hit("/events", &client_ip(&headers));

    let mut dtos = to_short_dtos(&state, records).await;
    if sort == Some(EventSort::Views) {
        dtos.sort_by(|a, b| b.views.cmp(&a.views));
    }

    Ok(Json(dtos))
}

/// GET /events/{id}
pub async fn get_public_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = EventRepo::find_published(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id })?;

    state.stats.record_hit(&event_uri(id), &client_ip(&headers));

    Ok(Json(to_full_dto(&state, record).await))
}
