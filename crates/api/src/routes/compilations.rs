//! Route definitions for compilations.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::compilations;
use crate::state::AppState;

/// ```text
/// POST   /admin/compilations       -> create_compilation
/// PATCH  /admin/compilations/{id}  -> update_compilation
/// DELETE /admin/compilations/{id}  -> delete_compilation
/// GET    /compilations             -> list_compilations
/// GET    /compilations/{id}        -> get_compilation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/compilations", post(compilations::create_compilation))
        .route(
            "/admin/compilations/{id}",
            patch(compilations::update_compilation).delete(compilations::delete_compilation),
        )
        .route("/compilations", get(compilations::list_compilations))
        .route("/compilations/{id}", get(compilations::get_compilation))
}
