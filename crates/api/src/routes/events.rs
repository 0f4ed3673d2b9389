//! Route definitions for events.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// ```text
/// POST  /users/{userId}/events            -> create_event
/// GET   /users/{userId}/events            -> list_user_events
/// GET   /users/{userId}/events/{eventId}  -> get_user_event
/// PATCH /users/{userId}/events/{eventId}  -> update_user_event
/// GET   /admin/events                     -> admin_search_events
/// PATCH /admin/events/{eventId}           -> admin_update_event
/// GET   /events                           -> public_search_events
/// GET   /events/{eventId}                 -> get_public_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/events",
            get(events::list_user_events).post(events::create_event),
        )
        .route(
            "/users/{user_id}/events/{event_id}",
            get(events::get_user_event).patch(events::update_user_event),
        )
        .route("/admin/events", get(events::admin_search_events))
        .route("/admin/events/{event_id}", patch(events::admin_update_event))
        .route("/events", get(events::public_search_events))
        .route("/events/{event_id}", get(events::get_public_event))
}
