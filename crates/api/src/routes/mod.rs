pub mod auth;
pub mod badges;
pub mod health;
pub mod leaderboard;
pub mod me;
pub mod stats;
pub mod surveys;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/session                         upsert caller (auth)
///
/// /surveys                              feed, post (auth)
/// /surveys/{id}                         get (auth)
/// /surveys/{id}/complete                record completion (auth)
/// /surveys/{id}/completion              completion status (auth)
/// /surveys/{id}/deactivate              owner deactivation (auth)
///
/// /eligibility                          posting eligibility (auth)
///
/// /me                                   profile (auth)
/// /me/surveys                           own surveys (auth)
/// /me/completions                       own completions (auth)
/// /me/completed-survey-ids              completed ids (auth)
/// /me/badges                            earned badges (auth)
///
/// /leaderboard                          ranked users (public)
/// /badges                               badge catalog (public)
/// /stats                                platform stats (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/surveys", surveys::router())
        .route("/eligibility", get(handlers::eligibility::get_eligibility))
        .nest("/me", me::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/badges", badges::router())
        .nest("/stats", stats::router())
}
