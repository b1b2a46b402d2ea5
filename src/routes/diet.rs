// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plan routes.

use crate::error::{AppError, Result};
use crate::models::{ApiResponse, DietPlan, Meal, Nutrition};
use crate::routes::extract::{required, ApiJson, ApiQuery, DateQuery};
use crate::time_utils::validate_date;
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/diet", get(get_diet_plan).delete(delete_diet_plan))
        // Older clients delete with a trailing slash.
        .route("/api/diet/", delete(delete_diet_plan))
        .route("/api/diet/complete", post(mark_meal_complete))
        .route("/api/diet/incomplete", delete(mark_meal_incomplete))
        .route("/api/diet/update", put(update_diet_plan))
}

#[derive(Debug, Deserialize, Validate)]
struct MealStatusRequest {
    #[validate(required, custom(function = "validate_date"))]
    date: Option<String>,
    #[serde(rename = "mealTime")]
    #[validate(required, length(min = 1, message = "mealTime must not be empty"))]
    meal_time: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct UpdateDietPlanRequest {
    #[validate(required, custom(function = "validate_date"))]
    date: Option<String>,
    #[validate(required)]
    meals: Option<Vec<Meal>>,
    #[serde(rename = "dailyTotal", default)]
    daily_total: Option<Nutrition>,
}

/// Get the diet plan for `?date=`; `data` is null when none exists.
async fn get_diet_plan(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<ApiResponse<DietPlan>> {
    let date = query.into_date()?;
    let plan = state.db.get_diet_plan(&date).await?;

    tracing::debug!(date = %date, found = plan.is_some(), "Fetched diet plan");
    Ok(ApiResponse::maybe(plan))
}

async fn mark_meal_complete(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<MealStatusRequest>,
) -> Result<ApiResponse<DietPlan>> {
    set_meal_status(&state, req, true).await
}

async fn mark_meal_incomplete(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<MealStatusRequest>,
) -> Result<ApiResponse<DietPlan>> {
    set_meal_status(&state, req, false).await
}

/// Add or remove a meal time from the plan's completed set.
///
/// Already being in the requested state is not an error; nothing is written.
async fn set_meal_status(
    state: &AppState,
    req: MealStatusRequest,
    completed: bool,
) -> Result<ApiResponse<DietPlan>> {
    req.validate()?;
    let date = required(req.date, "date")?;
    let meal_time = required(req.meal_time, "mealTime")?;

    let mut plan = state
        .db
        .get_diet_plan(&date)
        .await?
        .ok_or_else(|| AppError::NotFound("No diet plan found for this date".to_string()))?;

    if plan.set_meal_completed(&meal_time, completed, chrono::Utc::now()) {
        plan = state.db.set_diet_plan(&plan).await?;
        tracing::info!(date = %date, meal_time = %meal_time, completed, "Meal status updated");
    } else {
        tracing::debug!(date = %date, meal_time = %meal_time, completed, "Meal status unchanged");
    }

    Ok(ApiResponse::ok(plan))
}

/// Create or replace the meals of a plan, keeping its completed set.
async fn update_diet_plan(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpdateDietPlanRequest>,
) -> Result<ApiResponse<DietPlan>> {
    req.validate()?;
    let date = required(req.date, "date")?;
    let meals = required(req.meals, "meals")?;
    let daily_total = req.daily_total.unwrap_or_default();
    let now = chrono::Utc::now();

    let plan = match state.db.get_diet_plan(&date).await? {
        Some(mut existing) => {
            existing.replace_meals(meals, daily_total, now);
            existing
        }
        None => DietPlan::new(&date, meals, daily_total, now),
    };

    let plan = state.db.set_diet_plan(&plan).await?;
    tracing::info!(date = %date, meals = plan.meals.len(), "Diet plan saved");

    Ok(ApiResponse::ok(plan))
}

async fn delete_diet_plan(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<ApiResponse<()>> {
    let date = query.into_date()?;

    if !state.db.delete_diet_plan(&date).await? {
        return Err(AppError::NotFound(
            "No diet plan found for this date".to_string(),
        ));
    }

    tracing::info!(date = %date, "Diet plan deleted");
    Ok(ApiResponse::empty())
}
