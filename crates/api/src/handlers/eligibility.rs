//! Handler for `GET /eligibility`.

use axum::extract::State;
use axum::Json;
use survex_core::eligibility::Eligibility;
use survex_db::models::user::User;
use survex_db::repositories::SurveyRepo;

use crate::error::AppResult;
use crate::handlers::session::ensure_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Evaluate the configured posting policy for `user` against the current
/// number of active surveys.
pub async fn evaluate_for(state: &AppState, user: &User) -> AppResult<Eligibility> {
    let active = SurveyRepo::count_active(&state.pool).await?;
    Ok(state
        .config
        .eligibility
        .evaluate(user.surveys_completed, active))
}

/// GET /api/v1/eligibility
///
/// Whether the caller may post a survey right now, and why.
pub async fn get_eligibility(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Eligibility>>> {
    let user = ensure_user(&state.pool, &auth).await?;
    let eligibility = evaluate_for(&state, &user).await?;
    Ok(Json(DataResponse { data: eligibility }))
}
