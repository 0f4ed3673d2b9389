//! Route definitions for comments.
//!
//! On `/users/{userId}/comments/{id}` the trailing segment is an event ID
//! for POST and a comment ID for every other method.

use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// ```text
/// POST   /users/{userId}/comments/{eventId}    -> create_comment
/// GET    /users/{userId}/comments/{commentId}  -> get_own_comment
/// PATCH  /users/{userId}/comments/{commentId}  -> update_comment
/// DELETE /users/{userId}/comments/{commentId}  -> delete_comment
/// GET    /users/{userId}/comments              -> list_own_comments
/// GET    /events/{eventId}/comments            -> list_event_comments
/// GET    /admin/comments                       -> admin_search_comments
/// GET    /admin/comments/{commentId}           -> admin_get_comment
/// DELETE /admin/comments/{commentId}           -> admin_hide_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/comments", get(comments::list_own_comments))
        .route(
            "/users/{user_id}/comments/{id}",
            get(comments::get_own_comment)
                .post(comments::create_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/events/{event_id}/comments", get(comments::list_event_comments))
        .route("/admin/comments", get(comments::admin_search_comments))
        .route(
            "/admin/comments/{comment_id}",
            get(comments::admin_get_comment).delete(comments::admin_hide_comment),
        )
}
