//! Database layer (Firestore).

pub mod firestore;

pub use self::firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const DIET_PLANS: &str = "diet_plans";
    pub const WORKOUT_PLANS: &str = "workout_plans";
    /// Workout templates (keyed by weekday name)
    pub const WORKOUT_TEMPLATES: &str = "workout_templates";
    pub const TASKS: &str = "tasks";
}
