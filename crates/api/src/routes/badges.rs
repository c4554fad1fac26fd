use axum::routing::get;
use axum::Router;

use crate::handlers::badge;
use crate::state::AppState;

/// Routes mounted at `/badges` (public).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(badge::list_badges))
}
