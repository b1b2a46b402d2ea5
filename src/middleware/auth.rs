// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SECONDS_PER_DAY: usize = 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Middleware that requires a valid `Authorization: Bearer` token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_jwt(token, &state.config.jwt_signing_key)?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
    });

    Ok(next.run(request).await)
}

/// Decode and validate a session token.
///
/// Expired tokens yield `TokenExpired`; every other failure (bad signature,
/// malformed token, wrong algorithm) yields `InvalidToken`.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            tracing::debug!("Rejected expired token");
            AppError::TokenExpired
        }
        kind => {
            tracing::debug!(error = ?kind, "Rejected invalid token");
            AppError::InvalidToken
        }
    })?;

    if token_data.claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(token_data.claims)
}

/// Create a JWT for a user session, valid for `ttl_days`.
pub fn create_jwt(user_id: &str, signing_key: &[u8], ttl_days: u32) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_days as usize * SECONDS_PER_DAY,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

    fn now() -> usize {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
    }

    #[test]
    fn test_jwt_roundtrip() {
        let token = create_jwt("user-123", KEY, 7).unwrap();
        let claims = verify_jwt(&token, KEY).unwrap();

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.exp - claims.iat, 7 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let claims = Claims {
            sub: "user-123".to_string(),
            iat: now() - 2 * SECONDS_PER_DAY,
            exp: now() - SECONDS_PER_DAY,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(KEY))
            .unwrap();

        assert!(matches!(verify_jwt(&token, KEY), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let token = create_jwt("user-123", KEY, 7).unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        // Swap the payload for one claiming a different subject.
        let forged = create_jwt("admin", b"some_other_key_entirely_32_bytes", 7).unwrap();
        parts[1] = forged.split('.').nth(1).unwrap().to_string();
        let tampered = parts.join(".");

        assert!(matches!(verify_jwt(&tampered, KEY), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_key_and_garbage_are_invalid() {
        let token = create_jwt("user-123", KEY, 7).unwrap();
        assert!(matches!(
            verify_jwt(&token, b"wrong_key_wrong_key_wrong_key!!!"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            verify_jwt("not.a.token", KEY),
            Err(AppError::InvalidToken)
        ));
    }
}
