//! Route definitions for participation requests.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// ```text
/// GET   /users/{userId}/requests                      -> list_own_requests
/// POST  /users/{userId}/requests?eventId=             -> create_request
/// PATCH /users/{userId}/requests/{requestId}/cancel   -> cancel_request
/// GET   /users/{userId}/events/{eventId}/requests     -> list_event_requests
/// PATCH /users/{userId}/events/{eventId}/requests     -> decide_requests
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/requests",
            get(requests::list_own_requests).post(requests::create_request),
        )
        .route(
            "/users/{user_id}/requests/{request_id}/cancel",
            patch(requests::cancel_request),
        )
        .route(
            "/users/{user_id}/events/{event_id}/requests",
            get(requests::list_event_requests).patch(requests::decide_requests),
        )
}
