//! Integration tests for the `/api/v1/projects` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", json!({ "name": "Alpha" })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Alpha");
    assert!(json["id"].as_i64().unwrap() > 0);
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = post_json(app.clone(), "/api/v1/projects", json!({ "name": "Alpha" })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/v1/projects", json!({ "name": "Alpha" })).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
    assert!(json["error"].as_str().unwrap().contains("uq_projects_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_name_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({ "name": "this-name-is-way-too-long" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("ck_projects_name_length"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn nul_in_name_is_a_conflict_not_a_server_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/projects", json!({ "name": "a\0b" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("ck_projects_name_chars"));

    let response = get(app, "/api/v1/projects/by-name/a%00b").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_name_field_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_name_finds_created_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app.clone(), "/api/v1/projects", json!({ "name": "Beta" })).await;
    let created = body_json(response).await;

    let response = get(app, "/api/v1/projects/by-name/Beta").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], created["id"]);
    assert_eq!(json["name"], "Beta");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_unknown_name_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/projects/by-name/Ghost").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with name 'Ghost' not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_and_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app.clone(), "/api/v1/projects", json!({ "name": "Gamma" })).await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{id}");

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Gamma");

    assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_find_delete_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        json!({ "name": "Project-12345" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;

    let response = get(app.clone(), "/api/v1/projects/by-name/Project-12345").await;
    assert_eq!(response.status(), StatusCode::OK);
    let found = body_json(response).await;
    assert_eq!(found, created);

    let id = created["id"].as_i64().unwrap();
    let deleted = delete(app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get(app, "/api/v1/projects/by-name/Project-12345").await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
