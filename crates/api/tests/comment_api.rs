//! HTTP-level integration tests for comments: author CRUD, public listing,
//! and admin moderation.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, patch_json, post_json, publish_event, seed_category, seed_event,
    seed_user,
};
use sqlx::PgPool;

async fn seed_published_event(pool: &PgPool, initiator: i64, category: i64) -> i64 {
    let event = seed_event(pool, initiator, category).await;
    publish_event(pool, event).await;
    event
}

async fn seed_comment(pool: &PgPool, author: i64, event: i64, text: &str) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/users/{author}/comments/{event}"),
        serde_json::json!({"text": text}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_round_trip(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/users/{author}/comments/{event}"),
        serde_json::json!({"text": "Looking forward to this"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let comment = json["id"].as_i64().unwrap();
    assert_eq!(json["text"], "Looking forward to this");
    assert_eq!(json["authorName"], "Anna");
    assert_eq!(json["eventId"], event);

    let response = get(
        common::build_test_app(pool),
        &format!("/users/{author}/comments/{comment}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], comment);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_on_pending_event_returns_409_without_persisting(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, initiator, category).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/users/{author}/comments/{event}"),
        serde_json::json!({"text": "Too early to comment"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(
        common::build_test_app(pool),
        &format!("/users/{author}/comments"),
    )
    .await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_text_returns_400(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/users/{author}/comments/{event}"),
        serde_json::json!({"text": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn author_can_edit_own_comment(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    let comment = seed_comment(&pool, author, event, "First draft").await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/users/{author}/comments/{comment}"),
        serde_json::json!({"text": "Second draft"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["text"], "Second draft");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_comment_access_returns_403(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let intruder = seed_user(&pool, "Boris", "boris@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    let comment = seed_comment(&pool, author, event, "Mine alone").await;

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/users/{intruder}/comments/{comment}"),
        serde_json::json!({"text": "Hijack attempt"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(
        common::build_test_app(pool),
        &format!("/users/{intruder}/comments/{comment}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn author_delete_removes_comment(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    let comment = seed_comment(&pool, author, event, "Soon gone").await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/users/{author}/comments/{comment}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/events/{event}/comments"),
    )
    .await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_listing_shows_newest_first(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    seed_comment(&pool, author, event, "First comment").await;
    let second = seed_comment(&pool, author, event, "Second comment").await;

    let response = get(
        common::build_test_app(pool),
        &format!("/events/{event}/comments"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_hide_removes_comment_from_public_listing(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    let comment = seed_comment(&pool, author, event, "Off topic remark").await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/admin/comments/{comment}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/events/{event}/comments"),
    )
    .await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    // The row itself survives for the admin view.
    let response = get(
        common::build_test_app(pool),
        &format!("/admin/comments/{comment}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_hide_unknown_comment_returns_404(pool: PgPool) {
    let response = delete(common::build_test_app(pool), "/admin/comments/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_search_matches_recent_comments_by_text(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    seed_comment(&pool, author, event, "Great venue and lineup").await;
    seed_comment(&pool, author, event, "Parking was terrible").await;

    // Default window is the last few seconds, which covers fresh rows.
    let response = get(
        common::build_test_app(pool.clone()),
        "/admin/comments?text=venue",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "Great venue and lineup");

    let response = get(
        common::build_test_app(pool),
        &format!("/admin/comments?userIds={author}"),
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_search_inverted_range_returns_400(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/admin/comments?rangeStart=2035-01-02%2000:00:00&rangeEnd=2035-01-01%2000:00:00",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn own_comments_filter_by_event(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let first_event = seed_published_event(&pool, initiator, category).await;
    let second_event = seed_published_event(&pool, initiator, category).await;
    seed_comment(&pool, author, first_event, "On the first event").await;
    seed_comment(&pool, author, second_event, "On the second event").await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/users/{author}/comments?eventId={first_event}"),
    )
    .await;
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["eventId"], first_event);

    let response = get(
        common::build_test_app(pool),
        &format!("/users/{author}/comments"),
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_search_sort_direction_applies_to_creation_time(pool: PgPool) {
    let initiator = seed_user(&pool, "Owner", "owner@example.com").await;
    let author = seed_user(&pool, "Anna", "anna@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_published_event(&pool, initiator, category).await;
    let first = seed_comment(&pool, author, event, "First impression").await;
    let second = seed_comment(&pool, author, event, "Second thoughts").await;

    let response = get(common::build_test_app(pool.clone()), "/admin/comments?sort=ASC").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first);

    // Newest first without an explicit direction.
    let response = get(common::build_test_app(pool.clone()), "/admin/comments").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap()[0]["id"], second);

    let response = get(common::build_test_app(pool), "/admin/comments?sort=SIDEWAYS").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
