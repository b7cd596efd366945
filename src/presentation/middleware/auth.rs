//! Authentication Middleware
//!
//! Bearer token verification for room routes. Tokens are issued elsewhere;
//! this layer only checks the signature, expiry and verification flag, then
//! attaches the [`CallerIdentity`] to the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::CallerIdentity;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Whether the account finished email verification
    #[serde(default)]
    pub is_verified: bool,
}

/// Decode an HS256 token into the caller it was issued for.
///
/// Signature, expiry and subject problems are `Unauthorized`; the verification
/// flag is not checked here.
pub fn decode_caller(token: &str, secret: &str) -> Result<CallerIdentity, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    let user_id: i64 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

    Ok(CallerIdentity::new(user_id, token_data.claims.is_verified))
}

/// Authentication middleware that validates JWT tokens
///
/// Missing or invalid tokens are rejected with 401, unverified accounts with 403.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Authorization(bearer) = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let caller = decode_caller(bearer.token(), &state.settings.jwt.secret)?;

    if !caller.verified {
        tracing::debug!(user_id = caller.user_id, "Rejected unverified account");
        return Err(AppError::Forbidden("Account is not verified".into()));
    }

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}
