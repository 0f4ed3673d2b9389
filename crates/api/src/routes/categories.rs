//! Route definitions for categories.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// ```text
/// POST   /admin/categories        -> create_category
/// PATCH  /admin/categories/{id}   -> rename_category
/// DELETE /admin/categories/{id}   -> delete_category
/// GET    /categories              -> list_categories
/// GET    /categories/{id}         -> get_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/categories", post(categories::create_category))
        .route(
            "/admin/categories/{id}",
            patch(categories::rename_category).delete(categories::delete_category),
        )
        .route("/categories", get(categories::list_categories))
        .route("/categories/{id}", get(categories::get_category))
}
