// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plan and weekday template routes.

use crate::error::{AppError, Result};
use crate::models::{ApiResponse, WorkoutCategory, WorkoutPlan, WorkoutTemplate};
use crate::routes::extract::{required, ApiJson, ApiQuery, DateQuery};
use crate::time_utils::{normalize_weekday, parse_date, validate_date, weekday_name};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workout",
            get(get_workout_plan)
                .post(create_workout_plan)
                .put(update_workout_plan)
                .delete(delete_workout_plan),
        )
        .route("/api/workout/complete", post(mark_exercise_complete))
        .route("/api/workout/templates", get(list_templates))
        .route("/api/workout/templates/{day}", put(update_template))
}

#[derive(Debug, Deserialize, Validate)]
struct WorkoutPlanRequest {
    #[validate(required, custom(function = "validate_date"))]
    date: Option<String>,
    #[validate(required)]
    workouts: Option<Vec<WorkoutCategory>>,
}

#[derive(Debug, Deserialize, Validate)]
struct ExerciseStatusRequest {
    #[validate(required, custom(function = "validate_date"))]
    date: Option<String>,
    #[serde(rename = "exerciseId")]
    #[validate(required, length(min = 1, message = "exerciseId must not be empty"))]
    exercise_id: Option<String>,
    /// Defaults to marking the exercise done.
    completed: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
struct TemplateRequest {
    #[validate(required)]
    categories: Option<Vec<WorkoutCategory>>,
}

/// Get the plan for `?date=`, seeding it from the weekday template on first access.
async fn get_workout_plan(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<ApiResponse<WorkoutPlan>> {
    let date = query.into_date()?;
    let day = parse_date(&date)
        .map(weekday_name)
        .ok_or_else(|| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    let plan = state.db.get_or_materialize_workout_plan(&date, day).await?;
    Ok(ApiResponse::maybe(plan))
}

/// Create a plan for a date that has none. Returns the plan id (its date).
async fn create_workout_plan(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<WorkoutPlanRequest>,
) -> Result<ApiResponse<String>> {
    req.validate()?;
    let date = required(req.date, "date")?;
    let workouts = required(req.workouts, "workouts")?;

    let plan = WorkoutPlan::new(&date, workouts, chrono::Utc::now());
    if !state.db.insert_workout_plan(&plan).await? {
        return Err(AppError::Conflict(
            "A workout plan already exists for this date".to_string(),
        ));
    }

    tracing::info!(date = %date, categories = plan.workouts.len(), "Workout plan created");
    Ok(ApiResponse::ok(date))
}

/// Create or replace the workouts for a date. Returns the date.
async fn update_workout_plan(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<WorkoutPlanRequest>,
) -> Result<ApiResponse<String>> {
    req.validate()?;
    let date = required(req.date, "date")?;
    let workouts = required(req.workouts, "workouts")?;
    let now = chrono::Utc::now();

    let plan = match state.db.get_workout_plan(&date).await? {
        Some(mut existing) => {
            existing.workouts = workouts;
            existing.updated_at = now;
            existing
        }
        None => WorkoutPlan::new(&date, workouts, now),
    };
    state.db.set_workout_plan(&plan).await?;

    tracing::info!(date = %date, "Workout plan saved");
    Ok(ApiResponse::ok(date))
}

async fn mark_exercise_complete(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ExerciseStatusRequest>,
) -> Result<ApiResponse<WorkoutPlan>> {
    req.validate()?;
    let date = required(req.date, "date")?;
    let exercise_id = required(req.exercise_id, "exerciseId")?;
    let completed = req.completed.unwrap_or(true);
    let not_found = || AppError::NotFound("Exercise not found".to_string());

    let mut plan = state
        .db
        .get_workout_plan(&date)
        .await?
        .ok_or_else(not_found)?;

    if !plan.set_exercise_completed(&exercise_id, completed, chrono::Utc::now()) {
        return Err(not_found());
    }

    let plan = state.db.set_workout_plan(&plan).await?;
    tracing::info!(date = %date, exercise_id = %exercise_id, completed, "Exercise status updated");

    Ok(ApiResponse::ok(plan))
}

async fn delete_workout_plan(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<ApiResponse<()>> {
    let date = query.into_date()?;

    if !state.db.delete_workout_plan(&date).await? {
        return Err(AppError::NotFound(
            "No workout plan found for this date".to_string(),
        ));
    }

    tracing::info!(date = %date, "Workout plan deleted");
    Ok(ApiResponse::empty())
}

// ─── Templates ───────────────────────────────────────────────

async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<WorkoutTemplate>>> {
    let templates = state.db.list_workout_templates().await?;
    Ok(ApiResponse::ok(templates))
}

/// Create or replace the template for a weekday (`monday`, `Mon`, ...).
async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    ApiJson(req): ApiJson<TemplateRequest>,
) -> Result<ApiResponse<WorkoutTemplate>> {
    let day = normalize_weekday(&day)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown weekday: {day}")))?;
    req.validate()?;
    let categories = required(req.categories, "categories")?;

    let template = WorkoutTemplate {
        day: day.to_string(),
        categories,
    };
    let template = state.db.set_workout_template(&template).await?;

    tracing::info!(day, "Workout template saved");
    Ok(ApiResponse::ok(template))
}
