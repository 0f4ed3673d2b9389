//! Route definitions for admin user management.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// GET    /admin/users        -> list_users
/// POST   /admin/users        -> create_user
/// DELETE /admin/users/{id}   -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(users::list_users).post(users::create_user))
        .route("/admin/users/{id}", axum::routing::delete(users::delete_user))
}
