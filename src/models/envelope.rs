// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uniform `{data, success, error}` response envelope.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response body shared by every `/api` route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::maybe(Some(data))
    }

    /// Successful response whose payload may legitimately be absent.
    pub fn maybe(data: Option<T>) -> Self {
        Self {
            data,
            success: true,
            error: None,
        }
    }

    /// Successful response with `data: null`.
    pub fn empty() -> Self {
        Self::maybe(None)
    }

    /// Failed response with an error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            error: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
