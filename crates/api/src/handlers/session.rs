//! Handlers for the `/auth` resource.
//!
//! Sign-in itself happens at the identity provider; this server only
//! registers the user behind a valid token.

use axum::extract::State;
use axum::Json;
use sqlx::PgPool;
use survex_db::models::user::User;
use survex_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load the caller's user row, creating it if this is their first request.
pub async fn ensure_user(pool: &PgPool, auth: &AuthUser) -> AppResult<User> {
    Ok(UserRepo::find_or_create(pool, &auth.to_upsert()).await?)
}

/// POST /api/v1/auth/session
///
/// Create the caller's user on first sign-in, or refresh their email and
/// display name from the token.
pub async fn start_session(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::upsert(&state.pool, &auth.to_upsert()).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Session started");

    Ok(Json(DataResponse { data: user }))
}
