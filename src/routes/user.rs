// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: registration, login, and the current user's profile.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser};
use crate::models::user::normalize_email;
use crate::models::{ApiResponse, User, UserProfile};
use crate::routes::extract::{required, ApiJson};
use crate::services::password::{hash_password_blocking, verify_password_blocking};
use crate::time_utils::validate_date;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Public account routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/register", post(register))
        .route("/api/user/login", post(login))
}

/// Account routes that require a session token.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/user/me", get(get_me))
}

#[derive(Debug, Default, Deserialize, Validate)]
struct RegisterRequest {
    #[validate(required, email(message = "email must be a valid email address"))]
    email: Option<String>,
    #[serde(rename = "firstName")]
    #[validate(required, length(min = 1, message = "firstName must not be empty"))]
    first_name: Option<String>,
    #[serde(rename = "lastName")]
    #[validate(required, length(min = 1, message = "lastName must not be empty"))]
    last_name: Option<String>,
    #[validate(required, range(min = 1, max = 150, message = "age must be between 1 and 150"))]
    age: Option<u32>,
    #[serde(rename = "birthDate")]
    #[validate(required, custom(function = "validate_date"))]
    birth_date: Option<String>,
    #[validate(required, range(exclusive_min = 0.0, message = "weight must be positive"))]
    weight: Option<f64>,
    #[validate(required, range(exclusive_min = 0.0, message = "height must be positive"))]
    height: Option<f64>,
    #[validate(
        required,
        length(min = 3, max = 32, message = "username must be 3 to 32 characters")
    )]
    username: Option<String>,
    #[validate(
        required,
        length(min = 8, message = "password must be at least 8 characters")
    )]
    password: Option<String>,
}

impl RegisterRequest {
    /// Strip surrounding whitespace so length checks see what gets stored.
    fn trimmed(mut self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        self.email = trim(self.email);
        self.first_name = trim(self.first_name);
        self.last_name = trim(self.last_name);
        self.username = trim(self.username);
        self
    }
}

#[derive(Debug, Deserialize, Validate)]
struct LoginRequest {
    #[validate(required)]
    email: Option<String>,
    #[validate(required)]
    password: Option<String>,
}

/// Token plus public profile, returned by register and login.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

fn issue_token(state: &AppState, user: User) -> Result<AuthPayload> {
    let token = create_jwt(
        &user.id,
        &state.config.jwt_signing_key,
        state.config.jwt_expiration_days,
    )
    .map_err(|e| AppError::Internal(e.context("JWT creation failed")))?;

    Ok(AuthPayload {
        token,
        user: user.into(),
    })
}

/// Register a new account.
///
/// Email and username must both be unused; this is checked before the write.
async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<AuthPayload>)> {
    let req = req.trimmed();
    req.validate()?;
    let email = normalize_email(&required(req.email, "email")?);
    let username = required(req.username, "username")?;
    let password = required(req.password, "password")?;

    let email_taken = state.db.find_user_by_email(&email).await?.is_some();
    if email_taken || state.db.find_user_by_username(&username).await?.is_some() {
        tracing::info!(email_taken, "Registration rejected: account already exists");
        return Err(AppError::Conflict(
            "User with this email or username already exists".to_string(),
        ));
    }

    let password_hash = hash_password_blocking(password).await?;
    let now = chrono::Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        username,
        password_hash,
        first_name: required(req.first_name, "firstName")?,
        last_name: required(req.last_name, "lastName")?,
        age: required(req.age, "age")?,
        birth_date: required(req.birth_date, "birthDate")?,
        weight: required(req.weight, "weight")?,
        height: required(req.height, "height")?,
        created_at: now,
        updated_at: now,
    };

    state.db.create_user(&user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    let payload = issue_token(&state, user)?;
    Ok((StatusCode::CREATED, ApiResponse::ok(payload)))
}

/// Exchange email and password for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<ApiResponse<AuthPayload>> {
    req.validate()?;
    let email = normalize_email(&required(req.email, "email")?);
    let password = required(req.password, "password")?;

    let Some(user) = state.db.find_user_by_email(&email).await? else {
        tracing::info!("Login failed: unknown email");
        return Err(AppError::InvalidCredentials(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        tracing::info!(user_id = %user.id, "Login failed: password mismatch");
        return Err(AppError::InvalidCredentials(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(ApiResponse::ok(issue_token(&state, user)?))
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<ApiResponse<UserProfile>> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(ApiResponse::ok(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> RegisterRequest {
        RegisterRequest {
            email: Some(" Ada@Example.com ".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            age: Some(36),
            birth_date: Some("1815-12-10".to_string()),
            weight: Some(55.0),
            height: Some(165.0),
            username: Some("  ada  ".to_string()),
            password: Some("analytical-engine".to_string()),
        }
    }

    #[test]
    fn test_register_request_is_trimmed_before_validation() {
        let request = complete_request().trimmed();
        assert!(request.validate().is_ok());
        assert_eq!(request.username.as_deref(), Some("ada"));
        assert_eq!(request.email.as_deref(), Some("Ada@Example.com"));
    }

    #[test]
    fn test_padded_short_username_is_rejected() {
        let request = RegisterRequest {
            username: Some("  a   ".to_string()),
            ..complete_request()
        }
        .trimmed();
        let err = AppError::from(request.validate().unwrap_err());
        assert_eq!(err.to_string(), "username must be 3 to 32 characters");
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let request = RegisterRequest {
            first_name: Some("   ".to_string()),
            last_name: Some("\t".to_string()),
            ..complete_request()
        }
        .trimmed();
        let err = AppError::from(request.validate().unwrap_err());
        assert_eq!(
            err.to_string(),
            "firstName must not be empty; lastName must not be empty"
        );
    }

    #[test]
    fn test_missing_fields_use_request_keys() {
        let err = AppError::from(RegisterRequest::default().validate().unwrap_err());
        assert_eq!(
            err.to_string(),
            "Missing required fields: age, birthDate, email, firstName, height, lastName, password, username, weight"
        );
    }
}
