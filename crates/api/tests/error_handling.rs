//! Cross-cutting behavior of the HTTP surface: error body shape, extractor
//! rejections, and middleware headers.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, seed_user};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/no/such/route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn domain_errors_carry_error_and_code_fields(pool: PgPool) {
    let response = delete(common::build_test_app(pool), "/admin/users/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("999999"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn conflict_body_names_the_constraint(pool: PgPool) {
    seed_user(&pool, "Ivan", "ivan@example.com").await;
    let response = post_json(
        common::build_test_app(pool),
        "/admin/users",
        serde_json::json!({"name": "Other", "email": "ivan@example.com"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_users_email"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_body_returns_400(pool: PgPool) {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_required_field_returns_422(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/admin/users",
        serde_json::json!({"name": "No email"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_path_id_returns_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/categories/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn responses_carry_a_request_id(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/categories").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_database_up(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "up");
    assert!(json["version"].is_string());
}
