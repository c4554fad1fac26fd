//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /session  -> start_session (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/session", post(session::start_session))
}
