//! Custom Extractors
//!
//! Axum extractors for the authenticated caller and room path parameters.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    RequestPartsExt,
};

use crate::domain::CallerIdentity;
use crate::shared::error::AppError;

/// Caller attached by `auth_middleware`.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub CallerIdentity);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .copied()
            .map(Caller)
            .ok_or_else(|| AppError::Unauthorized("Missing caller identity".into()))
    }
}

/// Numeric `{room_id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct RoomId(pub i64);

impl<S> FromRequestParts<S> for RoomId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = parts
            .extract::<Path<String>>()
            .await
            .map_err(|_| AppError::BadRequest("Missing room ID".into()))?;

        raw.parse()
            .map(RoomId)
            .map_err(|_| AppError::BadRequest("Invalid room ID".into()))
    }
}
