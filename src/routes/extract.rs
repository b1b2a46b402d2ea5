// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Extractors that report rejections through the API envelope.

use crate::error::{AppError, Result};
use crate::time_utils::validate_date;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

/// `Json<T>` whose rejection is a 400 `AppError`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Query<T>` whose rejection is a 400 `AppError`.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `?date=YYYY-MM-DD` query shared by plan routes.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// Validate and return the date. An empty `?date=` counts as missing.
    pub fn into_date(self) -> Result<String> {
        let date = self
            .date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::BadRequest("Date parameter is required".to_string()))?;
        validate_date(&date).map_err(|e| {
            AppError::BadRequest(e.message.map(|m| m.to_string()).unwrap_or_default())
        })?;
        Ok(date)
    }
}

/// Take a field already checked by `#[validate(required)]`.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing required fields: {field}")))
}
