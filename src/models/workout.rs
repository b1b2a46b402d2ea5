// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plans and the weekday templates they are seeded from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single exercise with its completion flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Free-form rep scheme ("10", "8-12", "AMRAP")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    /// Free-form duration ("30s", "20 min")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// A named group of exercises ("Warm-up", "Upper body").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutCategory {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Stored workout plan (document ID is the date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Date (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub workouts: Vec<WorkoutCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default workout for a weekday (document ID is the weekday name).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    /// Weekday name, e.g. "Monday"
    pub day: String,
    #[serde(default)]
    pub categories: Vec<WorkoutCategory>,
}

impl WorkoutPlan {
    pub fn new(date: &str, workouts: Vec<WorkoutCategory>, now: DateTime<Utc>) -> Self {
        Self {
            date: date.to_string(),
            workouts,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materialize a plan for `date` from a weekday template.
    ///
    /// Completion flags carried by the template are cleared.
    pub fn from_template(date: &str, template: &WorkoutTemplate, now: DateTime<Utc>) -> Self {
        let mut workouts = template.categories.clone();
        for exercise in workouts.iter_mut().flat_map(|c| c.exercises.iter_mut()) {
            exercise.completed = false;
        }
        Self::new(date, workouts, now)
    }

    /// Set the completion flag on every exercise with `exercise_id`.
    ///
    /// Returns `false` if no exercise in the plan has that id.
    pub fn set_exercise_completed(
        &mut self,
        exercise_id: &str,
        completed: bool,
        now: DateTime<Utc>,
    ) -> bool {
        let mut found = false;
        for exercise in self
            .workouts
            .iter_mut()
            .flat_map(|c| c.exercises.iter_mut())
            .filter(|e| e.id == exercise_id)
        {
            exercise.completed = completed;
            found = true;
        }
        if found {
            self.updated_at = now;
        }
        found
    }
}
