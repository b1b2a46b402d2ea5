// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated UUID (also used as document ID)
    pub id: String,
    /// Login email, normalized to lowercase
    pub email: String,
    pub username: String,
    /// Argon2 PHC string; never leaves the service
    #[serde(rename = "password")]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    /// Birth date (YYYY-MM-DD)
    pub birth_date: String,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile returned to clients; excludes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub birth_date: String,
    pub weight: f64,
    pub height: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
            birth_date: user.birth_date,
            weight: user.weight,
            height: user.height,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$salt$hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            age: 36,
            birth_date: "1815-12-10".to_string(),
            weight: 55.0,
            height: 165.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_stored_user_uses_password_field() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert!(value.get("password").is_some());
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["firstName"], "Ada");
    }

    #[test]
    fn test_profile_excludes_password() {
        let profile = UserProfile::from(sample_user());
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "ada");
        assert_eq!(value["birthDate"], "1815-12-10");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
