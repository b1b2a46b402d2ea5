// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! To-do task routes.

use crate::error::{AppError, Result};
use crate::models::task::{next_position, reorder};
use crate::models::{ApiResponse, Task};
use crate::routes::extract::{required, ApiJson, ApiQuery};
use crate::time_utils::validate_date;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, patch, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/reorder", patch(reorder_tasks))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .route("/api/tasks/{id}/completion", patch(set_completion))
}

#[derive(Debug, Deserialize, Validate)]
struct TaskListQuery {
    #[validate(custom(function = "validate_date"))]
    date: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateTaskRequest {
    #[validate(required, length(min = 1, message = "title must not be empty"))]
    title: Option<String>,
    #[validate(required, custom(function = "validate_date"))]
    date: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    title: Option<String>,
    #[validate(custom(function = "validate_date"))]
    date: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
}

impl UpdateTaskRequest {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.completed.is_none()
    }
}

#[derive(Debug, Deserialize, Validate)]
struct CompletionRequest {
    #[validate(required)]
    completed: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
struct ReorderRequest {
    #[serde(rename = "taskId")]
    #[validate(required, length(min = 1, message = "taskId must not be empty"))]
    task_id: Option<String>,
    #[serde(rename = "newIndex")]
    #[validate(required)]
    new_index: Option<usize>,
}

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}

/// List all tasks, or those for `?date=`, in display order.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<TaskListQuery>,
) -> Result<ApiResponse<Vec<Task>>> {
    query.validate()?;
    let tasks = state.db.list_tasks(query.date.as_deref()).await?;

    tracing::debug!(date = ?query.date, count = tasks.len(), "Fetched tasks");
    Ok(ApiResponse::ok(tasks))
}

/// Create a task at the end of its date's list.
async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> Result<ApiResponse<Task>> {
    req.validate()?;
    let title = required(req.title, "title")?;
    let date = required(req.date, "date")?;

    let siblings = state.db.list_tasks(Some(&date)).await?;
    let now = chrono::Utc::now();
    let task = Task {
        id: uuid::Uuid::new_v4().to_string(),
        title,
        position: next_position(&siblings),
        date,
        completed: req.completed.unwrap_or(false),
        description: req.description,
        created_at: now,
        updated_at: now,
    };

    let task = state.db.set_task(&task).await?;
    tracing::info!(task_id = %task.id, date = %task.date, "Task created");

    Ok(ApiResponse::ok(task))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> Result<ApiResponse<Task>> {
    if req.is_empty() {
        return Err(AppError::BadRequest("No data provided".to_string()));
    }
    req.validate()?;

    let mut task = state
        .db
        .get_task(&task_id)
        .await?
        .ok_or_else(task_not_found)?;

    if let Some(date) = req.date {
        if date != task.date {
            // Moving days: append to the end of the new day's list.
            let siblings = state.db.list_tasks(Some(&date)).await?;
            task.position = next_position(&siblings);
            task.date = date;
        }
    }
    if let Some(title) = req.title {
        task.title = title;
    }
    if let Some(description) = req.description {
        task.description = Some(description);
    }
    if let Some(completed) = req.completed {
        task.completed = completed;
    }
    task.updated_at = chrono::Utc::now();

    let task = state.db.set_task(&task).await?;
    tracing::info!(task_id = %task.id, "Task updated");

    Ok(ApiResponse::ok(task))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<ApiResponse<()>> {
    if !state.db.delete_task(&task_id).await? {
        return Err(task_not_found());
    }

    tracing::info!(task_id = %task_id, "Task deleted");
    Ok(ApiResponse::empty())
}

async fn set_completion(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    ApiJson(req): ApiJson<CompletionRequest>,
) -> Result<ApiResponse<Task>> {
    req.validate()?;
    let completed = required(req.completed, "completed")?;

    let mut task = state
        .db
        .get_task(&task_id)
        .await?
        .ok_or_else(task_not_found)?;

    task.completed = completed;
    task.updated_at = chrono::Utc::now();
    let task = state.db.set_task(&task).await?;

    tracing::info!(task_id = %task.id, completed, "Task completion updated");
    Ok(ApiResponse::ok(task))
}

/// Move a task within its date and persist the new positions.
///
/// Returns the date's tasks in their new order.
async fn reorder_tasks(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ReorderRequest>,
) -> Result<ApiResponse<Vec<Task>>> {
    req.validate()?;
    let task_id = required(req.task_id, "taskId")?;
    let new_index = required(req.new_index, "newIndex")?;

    let task = state
        .db
        .get_task(&task_id)
        .await?
        .ok_or_else(task_not_found)?;

    let siblings = state.db.list_tasks(Some(&task.date)).await?;
    let mut reordered = reorder(siblings, &task_id, new_index).ok_or_else(task_not_found)?;

    let now = chrono::Utc::now();
    for sibling in &mut reordered {
        sibling.updated_at = now;
    }
    state.db.set_tasks_atomic(&reordered).await?;

    tracing::info!(
        task_id = %task_id,
        date = %task.date,
        new_index,
        "Tasks reordered"
    );
    Ok(ApiResponse::ok(reordered))
}
