// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plan model: one plan per calendar date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Macronutrient totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// A single food within a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// A meal slot in the plan, identified by its meal time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Identifier such as "breakfast" or "08:00"
    pub meal_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<Nutrition>,
}

/// Stored diet plan (document ID is the date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    /// Date (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
    /// Meal times marked as eaten
    #[serde(default)]
    pub completed_meals: BTreeSet<String>,
    #[serde(default)]
    pub daily_total: Nutrition,
    pub last_updated: DateTime<Utc>,
}

impl DietPlan {
    pub fn new(date: &str, meals: Vec<Meal>, daily_total: Nutrition, now: DateTime<Utc>) -> Self {
        Self {
            date: date.to_string(),
            meals,
            completed_meals: BTreeSet::new(),
            daily_total,
            last_updated: now,
        }
    }

    /// Replace meals and totals, keeping completion state.
    pub fn replace_meals(&mut self, meals: Vec<Meal>, daily_total: Nutrition, now: DateTime<Utc>) {
        self.meals = meals;
        self.daily_total = daily_total;
        self.last_updated = now;
    }

    /// Set whether a meal time is completed.
    ///
    /// Returns `true` if the completed set changed.
    pub fn set_meal_completed(&mut self, meal_time: &str, completed: bool, now: DateTime<Utc>) -> bool {
        let changed = if completed {
            self.completed_meals.insert(meal_time.to_string())
        } else {
            self.completed_meals.remove(meal_time)
        };
        if changed {
            self.last_updated = now;
        }
        changed
    }
}
