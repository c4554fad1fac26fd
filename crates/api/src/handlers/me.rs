//! Handlers for the caller's own profile under `/me`.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use survex_core::eligibility::Eligibility;
use survex_core::scoring::effective_weekly_count;
use survex_core::types::DbId;
use survex_db::models::badge::EarnedBadge;
use survex_db::models::completion::CompletionWithSurvey;
use survex_db::models::survey::Survey;
use survex_db::models::user::User;
use survex_db::repositories::{BadgeRepo, CompletionRepo, SurveyRepo};

use crate::error::AppResult;
use crate::handlers::eligibility::evaluate_for;
use crate::handlers::session::ensure_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything the profile page shows, in one response.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: User,
    /// This week's completions; zero if the stored counter is from an
    /// earlier week.
    pub weekly_surveys_completed: i64,
    pub eligibility: Eligibility,
    pub surveys: Vec<Survey>,
    pub completions: Vec<CompletionWithSurvey>,
    pub badges: Vec<EarnedBadge>,
}

/// GET /api/v1/me
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let user = ensure_user(&state.pool, &auth).await?;
    let eligibility = evaluate_for(&state, &user).await?;
    let surveys = SurveyRepo::list_by_owner(&state.pool, user.id).await?;
    let completions = CompletionRepo::list_for_user_with_survey(&state.pool, user.id).await?;
    let badges = BadgeRepo::list_for_user(&state.pool, user.id).await?;

    let weekly_surveys_completed = effective_weekly_count(
        user.weekly_surveys_completed,
        user.last_weekly_reset,
        chrono::Utc::now(),
    );

    Ok(Json(DataResponse {
        data: Profile {
            user,
            weekly_surveys_completed,
            eligibility,
            surveys,
            completions,
            badges,
        },
    }))
}

/// GET /api/v1/me/surveys
///
/// Surveys the caller has posted, newest first, including inactive ones.
pub async fn list_my_surveys(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Survey>>>> {
    let surveys = SurveyRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// GET /api/v1/me/completions
pub async fn list_my_completions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CompletionWithSurvey>>>> {
    let completions = CompletionRepo::list_for_user_with_survey(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: completions }))
}

/// GET /api/v1/me/completed-survey-ids
pub async fn list_my_completed_survey_ids(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DbId>>>> {
    let ids = CompletionRepo::completed_survey_ids(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: ids }))
}

/// GET /api/v1/me/badges
pub async fn list_my_badges(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EarnedBadge>>>> {
    let badges = BadgeRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: badges }))
}
