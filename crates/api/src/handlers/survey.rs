//! Handlers for the `/surveys` resource: the ranked feed, posting,
//! completion and owner deactivation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use survex_core::error::CoreError;
use survex_core::pagination::{clamp_limit, clamp_offset};
use survex_core::ranking::{DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT};
use survex_core::scoring::POINTS_PER_COMPLETION;
use survex_core::survey::{validate_survey_draft, SurveyDraft};
use survex_core::types::DbId;
use survex_db::models::completion::{Completion, RecordCompletion, RecordOutcome};
use survex_db::models::survey::{CreateSurvey, FeedQuery, Survey};
use survex_db::repositories::{CompletionRepo, SurveyRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::session::ensure_user;
use crate::middleware::auth::AuthUser;
use crate::query::FeedParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body returned after posting a survey.
#[derive(Debug, Serialize)]
pub struct PostedSurvey {
    pub survey: Survey,
    /// Badge ids earned by this post.
    pub new_badges: Vec<DbId>,
}

/// Body returned after recording a completion.
#[derive(Debug, Serialize)]
pub struct CompletionReceipt {
    pub completion: Completion,
    /// The caller's lifetime completion count after this one.
    pub surveys_completed: i64,
    pub points_awarded: i64,
    /// Badge ids earned by this completion.
    pub new_badges: Vec<DbId>,
}

/// Whether the caller has completed a survey.
#[derive(Debug, Serialize)]
pub struct CompletionStatus {
    pub completed: bool,
    pub completion: Option<Completion>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a survey or fail with `NotFound`.
async fn find_survey(state: &AppState, id: DbId) -> AppResult<Survey> {
    SurveyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Survey",
                id,
            })
        })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/surveys
///
/// The active-survey feed, fewest responses first.
pub async fn list_feed(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    let query = FeedQuery {
        viewer: auth.user_id,
        exclude_completed: params.exclude_completed,
        exclude_own: params.exclude_own,
        limit: clamp_limit(params.limit, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let surveys = SurveyRepo::list_feed(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: surveys }))
}

/// POST /api/v1/surveys
///
/// Post a survey. The caller must satisfy the posting policy.
pub async fn create_survey(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(draft): Json<SurveyDraft>,
) -> AppResult<impl IntoResponse> {
    validate_survey_draft(&draft)?;

    let user = ensure_user(&state.pool, &auth).await?;
    let active = SurveyRepo::count_active(&state.pool).await?;
    let eligibility = state
        .config
        .eligibility
        .ensure_can_post(user.surveys_completed, active)
        .inspect_err(|_| {
            tracing::info!(
                user_id = %auth.user_id,
                surveys_completed = user.surveys_completed,
                active_surveys = active,
                "Survey post rejected: quota not met"
            );
        })?;

    let input = CreateSurvey {
        user_id: user.id,
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        external_url: draft.external_url.trim().to_string(),
        estimated_time_minutes: draft.estimated_time_minutes,
        response_count: draft.initial_response_count(),
        target_responses: draft.target_responses_or_default(),
    };
    let created = SurveyRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = %auth.user_id,
        survey_id = created.survey.id,
        reason = ?eligibility.reason,
        new_badges = ?created.new_badges,
        "Survey posted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PostedSurvey {
                survey: created.survey,
                new_badges: created.new_badges,
            },
        }),
    ))
}

/// GET /api/v1/surveys/{id}
///
/// A single survey with its owner, active or not.
pub async fn get_survey(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let survey = SurveyRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Survey",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: survey }))
}

/// POST /api/v1/surveys/{id}/complete
///
/// Record that the caller completed a survey, bump their counters and award
/// any badges they now qualify for.
pub async fn complete_survey(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user(&state.pool, &auth).await?;

    let input = RecordCompletion {
        user_id: user.id,
        survey_id,
        points: POINTS_PER_COMPLETION,
    };

    match CompletionRepo::record(&state.pool, &input).await? {
        RecordOutcome::Recorded {
            completion,
            surveys_completed,
            new_badges,
        } => {
            tracing::info!(
                user_id = %auth.user_id,
                survey_id,
                surveys_completed,
                new_badges = ?new_badges,
                "Survey completed"
            );
            Ok((
                StatusCode::CREATED,
                Json(DataResponse {
                    data: CompletionReceipt {
                        completion,
                        surveys_completed,
                        points_awarded: POINTS_PER_COMPLETION,
                        new_badges,
                    },
                }),
            ))
        }
        RecordOutcome::SurveyNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        })),
        RecordOutcome::Duplicate => {
            Err(AppError::Core(CoreError::DuplicateCompletion { survey_id }))
        }
        RecordOutcome::OwnSurvey => Err(AppError::Core(CoreError::SelfCompletionForbidden {
            survey_id,
        })),
        RecordOutcome::SurveyInactive => Err(AppError::Core(CoreError::Validation(
            "This survey is no longer accepting responses".into(),
        ))),
    }
}

/// GET /api/v1/surveys/{id}/completion
///
/// Whether the caller has completed the survey.
pub async fn completion_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_survey(&state, survey_id).await?;

    let completion = CompletionRepo::find(&state.pool, auth.user_id, survey_id).await?;
    Ok(Json(DataResponse {
        data: CompletionStatus {
            completed: completion.is_some(),
            completion,
        },
    }))
}

/// POST /api/v1/surveys/{id}/deactivate
///
/// Take a survey out of the feed. Only its owner may do this.
pub async fn deactivate_survey(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if let Some(survey) = SurveyRepo::deactivate(&state.pool, id, auth.user_id).await? {
        tracing::info!(user_id = %auth.user_id, survey_id = id, "Survey deactivated");
        return Ok(Json(DataResponse { data: survey }));
    }

    let survey = find_survey(&state, id).await?;
    if survey.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the survey's owner can deactivate it".into(),
        )));
    }
    Err(AppError::Core(CoreError::Conflict(
        "Survey is already inactive".into(),
    )))
}
