pub mod categories;
pub mod comments;
pub mod compilations;
pub mod events;
pub mod health;
pub mod requests;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree (mounted at the root, no version prefix).
///
/// Route hierarchy:
///
/// ```text
/// /admin/users                               list, create
/// /admin/users/{id}                          delete
/// /admin/categories                          create
/// /admin/categories/{id}                     rename, delete
/// /admin/events                              search
/// /admin/events/{eventId}                    moderate (PATCH)
/// /admin/comments                            search
/// /admin/comments/{commentId}                get, hide (DELETE)
/// /admin/compilations                        create
/// /admin/compilations/{id}                   update, delete
///
/// /categories                                public list
/// /categories/{id}                           public get
/// /events                                    public search (records a hit)
/// /events/{eventId}                          public get (records a hit)
/// /events/{eventId}/comments                 public comment list
/// /compilations                              public list
/// /compilations/{id}                         public get
///
/// /users/{userId}/events                     list, create
/// /users/{userId}/events/{eventId}           get, update
/// /users/{userId}/events/{eventId}/requests  list, bulk decide (PATCH)
/// /users/{userId}/requests                   list, create
/// /users/{userId}/requests/{id}/cancel       cancel (PATCH)
/// /users/{userId}/comments                   list own
/// /users/{userId}/comments/{id}              create (POST, id = event),
///                                            get/update/delete (id = comment)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(categories::router())
        .merge(events::router())
        .merge(requests::router())
        .merge(comments::router())
        .merge(compilations::router())
}
