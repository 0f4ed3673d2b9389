//! Handlers for participation requests.
//!
//! Every write locks the event row first, so the confirmed counter and the
//! request rows always change together.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use ewm_core::error::CoreError;
use ewm_core::event_state::EventState;
use ewm_core::participation::{self, RequestStatus};
use ewm_core::time;
use ewm_core::types::DbId;
use ewm_db::models::request::{
    EventRequestStatusUpdateRequest, EventRequestStatusUpdateResult, ParticipationRequestDto,
    StatusUpdateTarget,
};
use ewm_db::repositories::{EventRepo, RequestRepo, UserRepo};

use crate::error::AppResult;
use crate::state::AppState;

fn into_dtos(rows: Vec<ewm_db::models::request::ParticipationRequest>) -> Vec<ParticipationRequestDto> {
    rows.into_iter().map(|r| r.into_dto()).collect()
}

/// GET /users/{userId}/requests
pub async fn list_own_requests(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "User", id: user_id }.into());
    }
    let rows = RequestRepo::list_by_requester(&state.pool, user_id).await?;

    Ok(Json(into_dtos(rows)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestParams {
    pub event_id: DbId,
}

/// POST /users/{userId}/requests?eventId=
pub async fn create_request(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(params): Query<CreateRequestParams>,
) -> AppResult<impl IntoResponse> {
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "User", id: user_id }.into());
    }

    let mut tx = state.pool.begin().await.map_err(sqlx::Error::from)?;
    let event = EventRepo::lock_capacity(&mut *tx, params.event_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: params.event_id })?;

    if event.state != EventState::Published {
        return Err(CoreError::Conflict("Event is not published".into()).into());
    }
    if event.initiator_id == user_id {
        return Err(CoreError::Conflict(
            "Initiator cannot request participation in own event".into(),
        )
        .into());
    }
    if RequestRepo::exists_for(&mut *tx, params.event_id, user_id).await? {
        return Err(CoreError::Conflict("Request already exists".into()).into());
    }
    if event.participant_limit > 0 && event.confirmed_requests >= event.participant_limit {
        return Err(CoreError::Conflict("Participant limit reached".into()).into());
    }

    let status = participation::initial_status(event.participant_limit, event.request_moderation);
    let request =
        RequestRepo::insert(&mut *tx, params.event_id, user_id, time::now(), status).await?;
    if status == RequestStatus::Confirmed {
        EventRepo::set_confirmed_count(&mut *tx, event.id, event.confirmed_requests + 1).await?;
    }
    tx.commit().await.map_err(sqlx::Error::from)?;

    tracing::info!(
        request_id = request.id,
        event_id = params.event_id,
        requester_id = user_id,
        status = %status,
        "Participation request created",
    );

    Ok((StatusCode::CREATED, Json(request.into_dto())))
}

/// PATCH /users/{userId}/requests/{requestId}/cancel
pub async fn cancel_request(
    State(state): State<AppState>,
    Path((user_id, request_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Request", id: request_id })?;
    if request.requester_id != user_id {
        return Err(
            CoreError::Forbidden("Only the requester can cancel a request".into()).into(),
        );
    }

    let mut tx = state.pool.begin().await.map_err(sqlx::Error::from)?;
    let event = EventRepo::lock_capacity(&mut *tx, request.event_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: request.event_id })?;

    // A confirmed cancellation frees a slot.
    if request.status == RequestStatus::Confirmed {
        EventRepo::set_confirmed_count(&mut *tx, event.id, event.confirmed_requests - 1).await?;
    }
    let canceled = RequestRepo::update_status(&mut *tx, request_id, RequestStatus::Canceled).await?;
    tx.commit().await.map_err(sqlx::Error::from)?;

    tracing::info!(request_id, requester_id = user_id, "Participation request canceled");

    Ok(Json(canceled.into_dto()))
}

/// GET /users/{userId}/events/{eventId}/requests
pub async fn list_event_requests(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_record_of_initiator(&state.pool, event_id, user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;
    let rows = RequestRepo::list_for_event(&state.pool, event_id).await?;

    Ok(Json(into_dtos(rows)))
}

/// PATCH /users/{userId}/events/{eventId}/requests
///
/// Bulk decision over pending requests. Confirmation fills remaining
/// capacity in request-ID order and auto-rejects the excess.
pub async fn decide_requests(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(DbId, DbId)>,
    Json(input): Json<EventRequestStatusUpdateRequest>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_record_of_initiator(&state.pool, event_id, user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;

    let mut tx = state.pool.begin().await.map_err(sqlx::Error::from)?;
    let event = EventRepo::lock_capacity(&mut *tx, event_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id: event_id })?;

    if event.participant_limit == 0 || !event.request_moderation {
        return Err(CoreError::Conflict(
            "Event does not moderate participation requests".into(),
        )
        .into());
    }

    let targets = RequestRepo::list_for_event_by_ids(&mut *tx, event_id, &input.request_ids).await?;
    if targets.len() != input.request_ids.len() {
        return Err(CoreError::NotFound {
            entity: "Request",
            id: *input.request_ids.first().unwrap_or(&0),
        }
        .into());
    }
    if targets.iter().any(|r| r.status != RequestStatus::Pending) {
        return Err(
            CoreError::Conflict("Only pending requests can be updated".into()).into(),
        );
    }

    let result = match input.status {
        StatusUpdateTarget::Rejected => {
            let rejected =
                RequestRepo::update_status_bulk(&mut *tx, &input.request_ids, RequestStatus::Rejected)
                    .await?;
            EventRequestStatusUpdateResult {
                confirmed_requests: Vec::new(),
                rejected_requests: into_dtos(rejected),
            }
        }
        StatusUpdateTarget::Confirmed => {
            let ids: Vec<DbId> = targets.iter().map(|r| r.id).collect();
            let allocation = participation::allocate_confirmations(
                &ids,
                event.confirmed_requests,
                event.participant_limit,
            )?;
            let confirmed =
                RequestRepo::update_status_bulk(&mut *tx, &allocation.confirmed, RequestStatus::Confirmed)
                    .await?;
            let rejected = if allocation.rejected.is_empty() {
                Vec::new()
            } else {
                RequestRepo::update_status_bulk(&mut *tx, &allocation.rejected, RequestStatus::Rejected)
                    .await?
            };
            EventRepo::set_confirmed_count(&mut *tx, event.id, allocation.confirmed_count).await?;
            EventRequestStatusUpdateResult {
                confirmed_requests: into_dtos(confirmed),
                rejected_requests: into_dtos(rejected),
            }
        }
    };
    tx.commit().await.map_err(sqlx::Error::from)?;

    tracing::info!(
        event_id,
        confirmed = result.confirmed_requests.len(),
        rejected = result.rejected_requests.len(),
        "Participation requests decided",
    );

    Ok(Json(result))
}
