// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts and uniqueness lookups)
//! - Diet plans (keyed by date)
//! - Workout plans (keyed by date) and weekday templates
//! - Tasks (keyed by generated id)

use crate::config::Config;
use crate::db::collections;
use crate::error::AppError;
use crate::models::task::sort_tasks;
use crate::models::{DietPlan, Task, User, WorkoutPlan, WorkoutTemplate};
use crate::time_utils::WEEKDAYS;
use firestore::errors::FirestoreError;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let options = firestore::FirestoreDbOptions::new(config.gcp_project_id.clone())
            .with_database_id(config.firestore_database.clone());

        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if let Some(host) = &config.firestore_emulator_host {
            return Self::create_emulator_client(options, host).await;
        }

        let client = firestore::FirestoreDb::with_options(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(
            project = %config.gcp_project_id,
            database = %config.firestore_database,
            "Connected to Firestore"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(
        options: firestore::FirestoreDbOptions,
        host: &str,
    ) -> Result<Self, AppError> {
        tracing::info!(host, "Using unauthenticated connection for Firestore Emulator");

        // The emulator accepts any bearer token, so hand it a static unsigned one.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(host, "Connected to Firestore (Emulator/Unauthenticated)");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by (normalized) email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_user_by_field("email", email).await
    }

    /// Find a user by username.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_user_by_field("username", username).await
    }

    async fn find_user_by_field(&self, field: &str, value: &str) -> Result<Option<User>, AppError> {
        let value = value.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field(field).eq(value.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.into_iter().next())
    }

    /// Store a new user. Fails with `Conflict` if the id is already taken.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let result = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute::<User>()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(FirestoreError::DataConflictError(_)) => {
                Err(AppError::Conflict("User already exists".to_string()))
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    // ─── Diet Plan Operations ────────────────────────────────────

    /// Get the diet plan for a date.
    pub async fn get_diet_plan(&self, date: &str) -> Result<Option<DietPlan>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DIET_PLANS)
            .obj()
            .one(date)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace the diet plan for its date.
    pub async fn set_diet_plan(&self, plan: &DietPlan) -> Result<DietPlan, AppError> {
        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::DIET_PLANS)
            .document_id(&plan.date)
            .object(plan)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete the diet plan for a date. Returns `false` if there was none.
    pub async fn delete_diet_plan(&self, date: &str) -> Result<bool, AppError> {
        if self.get_diet_plan(date).await?.is_none() {
            return Ok(false);
        }
        self.delete_document(collections::DIET_PLANS, date).await?;
        Ok(true)
    }

    // ─── Workout Plan Operations ─────────────────────────────────

    /// Get the stored workout plan for a date.
    pub async fn get_workout_plan(&self, date: &str) -> Result<Option<WorkoutPlan>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUT_PLANS)
            .obj()
            .one(date)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a workout plan only if none exists for its date.
    ///
    /// Returns `false` (and writes nothing) when a plan is already present.
    pub async fn insert_workout_plan(&self, plan: &WorkoutPlan) -> Result<bool, AppError> {
        let result = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::WORKOUT_PLANS)
            .document_id(&plan.date)
            .object(plan)
            .execute::<WorkoutPlan>()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(FirestoreError::DataConflictError(_)) => Ok(false),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Create or replace the workout plan for its date.
    pub async fn set_workout_plan(&self, plan: &WorkoutPlan) -> Result<WorkoutPlan, AppError> {
        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUT_PLANS)
            .document_id(&plan.date)
            .object(plan)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete the workout plan for a date. Returns `false` if there was none.
    pub async fn delete_workout_plan(&self, date: &str) -> Result<bool, AppError> {
        if self.get_workout_plan(date).await?.is_none() {
            return Ok(false);
        }
        self.delete_document(collections::WORKOUT_PLANS, date).await?;
        Ok(true)
    }

    /// Get the stored plan for `date`, seeding it from the template for `weekday`
    /// on first access.
    ///
    /// Returns `None` when there is neither a plan nor a template. The seed write is
    /// create-only, so concurrent first reads store one plan and all callers
    /// return that same plan.
    pub async fn get_or_materialize_workout_plan(
        &self,
        date: &str,
        weekday: &str,
    ) -> Result<Option<WorkoutPlan>, AppError> {
        if let Some(plan) = self.get_workout_plan(date).await? {
            return Ok(Some(plan));
        }

        let Some(template) = self.get_workout_template(weekday).await? else {
            tracing::debug!(date, weekday, "No workout plan or template");
            return Ok(None);
        };

        let plan = WorkoutPlan::from_template(date, &template, chrono::Utc::now());
        if self.insert_workout_plan(&plan).await? {
            tracing::info!(date, weekday, "Workout plan materialized from template");
            return Ok(Some(plan));
        }

        // Lost the race to another request; return what it stored.
        tracing::debug!(date, "Workout plan created concurrently, re-reading");
        self.get_workout_plan(date).await
    }

    // ─── Workout Template Operations ─────────────────────────────

    /// Get the template for a weekday name ("Monday").
    pub async fn get_workout_template(
        &self,
        weekday: &str,
    ) -> Result<Option<WorkoutTemplate>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUT_TEMPLATES)
            .obj()
            .one(weekday)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all templates, Monday first.
    pub async fn list_workout_templates(&self) -> Result<Vec<WorkoutTemplate>, AppError> {
        let mut templates: Vec<WorkoutTemplate> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUT_TEMPLATES)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        templates.sort_by_key(|t| {
            WEEKDAYS
                .iter()
                .position(|day| *day == t.day)
                .unwrap_or(WEEKDAYS.len())
        });
        Ok(templates)
    }

    /// Create or replace the template for its weekday.
    pub async fn set_workout_template(
        &self,
        template: &WorkoutTemplate,
    ) -> Result<WorkoutTemplate, AppError> {
        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUT_TEMPLATES)
            .document_id(&template.day)
            .object(template)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Task Operations ─────────────────────────────────────────

    /// Get a task by id.
    pub async fn get_task(&self, task_id: &str) -> Result<Option<Task>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TASKS)
            .obj()
            .one(task_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List tasks, optionally for a single date, ordered by date then position.
    pub async fn list_tasks(&self, date: Option<&str>) -> Result<Vec<Task>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::TASKS);

        let mut tasks: Vec<Task> = if let Some(date) = date {
            let date = date.to_string();
            query
                .filter(move |q| q.for_all([q.field("date").eq(date.clone())]))
                .obj::<Task>()
                .query()
                .await
        } else {
            query.obj::<Task>().query().await
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    /// Create or replace a task.
    pub async fn set_task(&self, task: &Task) -> Result<Task, AppError> {
        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::TASKS)
            .document_id(&task.id)
            .object(task)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write several tasks in one transaction (all or nothing).
    pub async fn set_tasks_atomic(&self, tasks: &[Task]) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for task in tasks {
            client
                .fluent()
                .update()
                .in_col(collections::TASKS)
                .document_id(&task.id)
                .object(task)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add task to transaction: {}", e))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::debug!(count = tasks.len(), "Tasks written atomically");
        Ok(())
    }

    /// Delete a task. Returns `false` if it did not exist.
    pub async fn delete_task(&self, task_id: &str) -> Result<bool, AppError> {
        if self.get_task(task_id).await?.is_none() {
            return Ok(false);
        }
        self.delete_document(collections::TASKS, task_id).await?;
        Ok(true)
    }

    // ─── Helper Methods ────────────────────────────────────────────

    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(document_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
