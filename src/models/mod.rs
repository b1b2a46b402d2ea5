// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod diet;
pub mod envelope;
pub mod task;
pub mod user;
pub mod workout;

pub use diet::{DietPlan, FoodItem, Meal, Nutrition};
pub use envelope::ApiResponse;
pub use task::Task;
pub use user::{User, UserProfile};
pub use workout::{Exercise, WorkoutCategory, WorkoutPlan, WorkoutTemplate};
