//! HTTP-level integration tests for the event lifecycle and search.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, event_payload, get, patch_json, post_json, publish_event, seed_category,
    seed_event, seed_user,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_event_starts_pending(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/users/{user}/events"),
        event_payload(category),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["state"], "PENDING");
    assert_eq!(json["confirmedRequests"], 0);
    assert_eq!(json["views"], 0);
    assert_eq!(json["category"]["id"], category);
    assert_eq!(json["initiator"]["id"], user);
    assert_eq!(json["eventDate"], "2035-07-01 19:00:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_event_too_soon_returns_409_without_persisting(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;

    // The lead-time guard compares against local wall-clock time.
    let mut payload = event_payload(category);
    payload["eventDate"] = serde_json::json!(
        (chrono::Local::now().naive_local() + chrono::Duration::minutes(30))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    );
    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/users/{user}/events"),
        payload,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(
        common::build_test_app(pool),
        &format!("/users/{user}/events"),
    )
    .await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_annotation_returns_400(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;

    let mut payload = event_payload(category);
    payload["annotation"] = serde_json::json!("too short");
    let response = post_json(
        common::build_test_app(pool),
        &format!("/users/{user}/events"),
        payload,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_makes_event_publicly_visible(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;

    // Not visible while pending.
    let response = get(common::build_test_app(pool.clone()), &format!("/events/{event}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    publish_event(&pool, event).await;

    let response = get(common::build_test_app(pool.clone()), &format!("/events/{event}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["state"], "PUBLISHED");
    assert!(json["publishedOn"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_twice_returns_409(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;
    publish_event(&pool, event).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/admin/events/{event}"),
        serde_json::json!({"stateAction": "PUBLISH_EVENT"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reject_published_event_returns_409(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;
    publish_event(&pool, event).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/admin/events/{event}"),
        serde_json::json!({"stateAction": "REJECT_EVENT"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn user_cannot_update_published_event(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;
    publish_event(&pool, event).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/users/{user}/events/{event}"),
        serde_json::json!({"title": "New title for the show"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn user_cancel_and_resubmit_round_trip(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/users/{user}/events/{event}"),
        serde_json::json!({"stateAction": "CANCEL_REVIEW"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["state"], "CANCELED");

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/users/{user}/events/{event}"),
        serde_json::json!({"stateAction": "SEND_TO_REVIEW"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["state"], "PENDING");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_user_event_of_other_initiator_returns_404(pool: PgPool) {
    let owner = seed_user(&pool, "Owner", "owner@example.com").await;
    let other = seed_user(&pool, "Other", "other@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, owner, category).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/users/{other}/events/{event}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_search_returns_published_only(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let published = seed_event(&pool, user, category).await;
    seed_event(&pool, user, category).await;
    publish_event(&pool, published).await;

    let response = get(common::build_test_app(pool), "/events").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], published);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_search_filters_by_text(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;
    publish_event(&pool, event).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/events?text=ACOUSTIC",
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get(common::build_test_app(pool), "/events?text=opera").await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_search_filters_by_paid(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;
    publish_event(&pool, event).await;

    let response = get(common::build_test_app(pool.clone()), "/events?paid=false").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get(common::build_test_app(pool), "/events?paid=true").await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_search_inverted_range_returns_400(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/events?rangeStart=2035-01-02%2000:00:00&rangeEnd=2035-01-01%2000:00:00",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_search_rejects_unknown_sort(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/events?sort=PRICE").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_search_filters_by_state(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let published = seed_event(&pool, user, category).await;
    let pending = seed_event(&pool, user, category).await;
    publish_event(&pool, published).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/admin/events?states=PENDING",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], pending);

    let response = get(common::build_test_app(pool), "/admin/events").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_edit_pending_event_fields(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/admin/events/{event}"),
        serde_json::json!({"title": "Adjusted title"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Adjusted title");
    assert_eq!(json["state"], "PENDING");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_response_carries_recorded_views(pool: PgPool) {
    let user = seed_user(&pool, "Ivan", "ivan@example.com").await;
    let category = seed_category(&pool, "Concerts").await;
    let event = seed_event(&pool, user, category).await;
    publish_event(&pool, event).await;

    let stats_url = common::spawn_stats_stub(serde_json::json!([
        {"app": "ewm-main", "uri": format!("/events/{event}"), "hits": 7}
    ]))
    .await;

    let response = patch_json(
        common::build_test_app_with_stats(pool.clone(), &stats_url),
        &format!("/admin/events/{event}"),
        serde_json::json!({"title": "Adjusted after publication"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["views"], 7);

    // The public read of the same event agrees.
    let response = get(
        common::build_test_app_with_stats(pool, &stats_url),
        &format!("/events/{event}"),
    )
    .await;
    assert_eq!(body_json(response).await["views"], 7);
}
