//! Route definitions for the caller's profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require auth.
///
/// ```text
/// GET /                        get_profile
/// GET /surveys                 list_my_surveys
/// GET /completions             list_my_completions
/// GET /completed-survey-ids    list_my_completed_survey_ids
/// GET /badges                  list_my_badges
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_profile))
        .route("/surveys", get(me::list_my_surveys))
        .route("/completions", get(me::list_my_completions))
        .route(
            "/completed-survey-ids",
            get(me::list_my_completed_survey_ids),
        )
        .route("/badges", get(me::list_my_badges))
}
