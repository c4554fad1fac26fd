//! Route definitions for the `/surveys` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// Routes mounted at `/surveys`.
///
/// ```text
/// GET  /                  list_feed
/// POST /                  create_survey
/// GET  /{id}              get_survey
/// POST /{id}/complete     complete_survey
/// GET  /{id}/completion   completion_status
/// POST /{id}/deactivate   deactivate_survey
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(survey::list_feed).post(survey::create_survey))
        .route("/{id}", get(survey::get_survey))
        .route("/{id}/complete", post(survey::complete_survey))
        .route("/{id}/completion", get(survey::completion_status))
        .route("/{id}/deactivate", post(survey::deactivate_survey))
}
