// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! Every request here is rejected before the database is touched, so the
//! offline mock is enough.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, empty_request, json_request};

async fn assert_bad_request(request: Request<Body>, expected: &str) {
    let (app, _) = common::create_test_app();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    let error = body["error"].as_str().unwrap();
    assert!(
        error.contains(expected),
        "error {error:?} should contain {expected:?}"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// DIET
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_diet_get_requires_date() {
    assert_bad_request(
        empty_request("GET", "/api/diet"),
        "Date parameter is required",
    )
    .await;
}

#[tokio::test]
async fn test_diet_get_rejects_bad_date() {
    assert_bad_request(
        empty_request("GET", "/api/diet?date=05/06/2024"),
        "Invalid date format. Use YYYY-MM-DD",
    )
    .await;
}

#[tokio::test]
async fn test_diet_get_rejects_impossible_date() {
    assert_bad_request(
        empty_request("GET", "/api/diet?date=2024-02-30"),
        "Invalid date format",
    )
    .await;
}

#[tokio::test]
async fn test_diet_get_treats_empty_date_as_missing() {
    assert_bad_request(
        empty_request("GET", "/api/diet?date="),
        "Date parameter is required",
    )
    .await;
}

#[tokio::test]
async fn test_diet_get_rejects_unpadded_date() {
    assert_bad_request(
        empty_request("GET", "/api/diet?date=2024-5-6"),
        "Invalid date format. Use YYYY-MM-DD",
    )
    .await;
}

#[tokio::test]
async fn test_task_create_rejects_unpadded_date() {
    assert_bad_request(
        json_request(
            "POST",
            "/api/tasks",
            json!({ "title": "stretch", "date": "2024-05-6" }),
        ),
        "Invalid date format. Use YYYY-MM-DD",
    )
    .await;
}

#[tokio::test]
async fn test_meal_complete_requires_meal_time() {
    assert_bad_request(
        json_request("POST", "/api/diet/complete", json!({ "date": "2024-05-06" })),
        "Missing required fields: mealTime",
    )
    .await;
}

#[tokio::test]
async fn test_meal_incomplete_requires_both_fields() {
    assert_bad_request(
        json_request("DELETE", "/api/diet/incomplete", json!({})),
        "Missing required fields",
    )
    .await;
}

#[tokio::test]
async fn test_diet_update_requires_meals() {
    assert_bad_request(
        json_request("PUT", "/api/diet/update", json!({ "date": "2024-05-06" })),
        "Missing required fields: meals",
    )
    .await;
}

#[tokio::test]
async fn test_diet_delete_trailing_slash_validates() {
    assert_bad_request(
        empty_request("DELETE", "/api/diet/"),
        "Date parameter is required",
    )
    .await;
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKOUT
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_workout_get_requires_date() {
    assert_bad_request(
        empty_request("GET", "/api/workout"),
        "Date parameter is required",
    )
    .await;
}

#[tokio::test]
async fn test_workout_create_requires_workouts() {
    assert_bad_request(
        json_request("POST", "/api/workout", json!({ "date": "2024-05-06" })),
        "Missing required fields: workouts",
    )
    .await;
}

#[tokio::test]
async fn test_exercise_complete_requires_exercise_id() {
    assert_bad_request(
        json_request(
            "POST",
            "/api/workout/complete",
            json!({ "date": "2024-05-06" }),
        ),
        "Missing required fields: exerciseId",
    )
    .await;
}

#[tokio::test]
async fn test_template_rejects_unknown_weekday() {
    assert_bad_request(
        json_request(
            "PUT",
            "/api/workout/templates/someday",
            json!({ "categories": [] }),
        ),
        "Unknown weekday: someday",
    )
    .await;
}

// ═══════════════════════════════════════════════════════════════════════════
// TASKS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_task_create_requires_title_and_date() {
    assert_bad_request(
        json_request("POST", "/api/tasks", json!({})),
        "Missing required fields",
    )
    .await;
}

#[tokio::test]
async fn test_task_create_rejects_empty_title() {
    assert_bad_request(
        json_request(
            "POST",
            "/api/tasks",
            json!({ "title": "", "date": "2024-05-06" }),
        ),
        "title must not be empty",
    )
    .await;
}

#[tokio::test]
async fn test_task_update_requires_some_field() {
    assert_bad_request(
        json_request("PUT", "/api/tasks/abc", json!({})),
        "No data provided",
    )
    .await;
}

#[tokio::test]
async fn test_task_list_rejects_bad_date() {
    assert_bad_request(
        empty_request("GET", "/api/tasks?date=tomorrow"),
        "Invalid date format",
    )
    .await;
}

#[tokio::test]
async fn test_task_reorder_requires_index() {
    assert_bad_request(
        json_request("PATCH", "/api/tasks/reorder", json!({ "taskId": "abc" })),
        "Missing required fields: newIndex",
    )
    .await;
}

#[tokio::test]
async fn test_task_completion_requires_flag() {
    assert_bad_request(
        json_request("PATCH", "/api/tasks/abc/completion", json!({})),
        "Missing required fields: completed",
    )
    .await;
}

// ═══════════════════════════════════════════════════════════════════════════
// USER
// ═══════════════════════════════════════════════════════════════════════════

fn valid_registration() -> serde_json::Value {
    json!({
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "age": 36,
        "birthDate": "1815-12-10",
        "weight": 55.0,
        "height": 165.0,
        "username": "ada",
        "password": "analytical-engine"
    })
}

#[tokio::test]
async fn test_register_reports_missing_fields() {
    assert_bad_request(
        json_request(
            "POST",
            "/api/user/register",
            json!({ "email": "ada@example.com" }),
        ),
        "Missing required fields",
    )
    .await;
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let mut body = valid_registration();
    body["password"] = json!("short");
    assert_bad_request(
        json_request("POST", "/api/user/register", body),
        "password must be at least 8 characters",
    )
    .await;
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let mut body = valid_registration();
    body["email"] = json!("not-an-email");
    assert_bad_request(
        json_request("POST", "/api/user/register", body),
        "email must be a valid email address",
    )
    .await;
}

#[tokio::test]
async fn test_register_rejects_bad_birth_date() {
    let mut body = valid_registration();
    body["birthDate"] = json!("10 Dec 1815");
    assert_bad_request(
        json_request("POST", "/api/user/register", body),
        "Invalid date format",
    )
    .await;
}

#[tokio::test]
async fn test_register_rejects_nonpositive_weight() {
    let mut body = valid_registration();
    body["weight"] = json!(0);
    assert_bad_request(
        json_request("POST", "/api/user/register", body),
        "weight must be positive",
    )
    .await;
}

#[tokio::test]
async fn test_register_trims_username_before_length_check() {
    let mut body = valid_registration();
    body["username"] = json!("  a   ");
    assert_bad_request(
        json_request("POST", "/api/user/register", body),
        "username must be 3 to 32 characters",
    )
    .await;
}

#[tokio::test]
async fn test_register_rejects_blank_first_name() {
    let mut body = valid_registration();
    body["firstName"] = json!("   ");
    assert_bad_request(
        json_request("POST", "/api/user/register", body),
        "firstName must not be empty",
    )
    .await;
}

#[tokio::test]
async fn test_register_missing_fields_use_json_keys() {
    assert_bad_request(
        json_request(
            "POST",
            "/api/user/register",
            json!({ "email": "ada@example.com", "username": "ada", "password": "analytical-engine" }),
        ),
        "Missing required fields: age, birthDate, firstName, height, lastName, weight",
    )
    .await;
}

#[tokio::test]
async fn test_login_requires_password() {
    assert_bad_request(
        json_request(
            "POST",
            "/api/user/login",
            json!({ "email": "ada@example.com" }),
        ),
        "Missing required fields: password",
    )
    .await;
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/user/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (app, _) = common::create_test_app();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_database_failure_is_generic_500() {
    // Valid input reaches the offline database, which fails.
    let (app, _) = common::create_test_app();
    let response = app
        .oneshot(empty_request("GET", "/api/diet?date=2024-05-06"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
}
