//! The [`AuthUser`] extractor: a handler that takes one only runs for
//! requests carrying a valid provider token.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use survex_core::error::CoreError;
use survex_core::types::UserId;
use survex_db::models::user::UpsertUser;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// The caller, as identified by their token.
///
/// No database lookup happens here; handlers that need the user row call
/// `ensure_user`, which creates it on first contact.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

impl AuthUser {
    /// The upsert that registers this user on first contact.
    pub fn to_upsert(&self) -> UpsertUser {
        UpsertUser {
            id: self.user_id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            full_name: claims.full_name,
        }
    }
}

/// The token from `Authorization: Bearer <token>`. The scheme is matched
/// case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::Unauthorized("Sign in to continue".into()))?
        .to_str()
        .map_err(|_| CoreError::Unauthorized("Malformed Authorization header".into()))?;

    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty());
    token.ok_or_else(|| CoreError::Unauthorized("Authorization must be a Bearer token".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|err| {
            tracing::debug!(error = %err, "Rejected access token");
            let message = match err.kind() {
                ErrorKind::ExpiredSignature => "Session expired, sign in again",
                _ => "Invalid access token",
            };
            CoreError::Unauthorized(message.into())
        })?;

        Ok(claims.into())
    }
}
