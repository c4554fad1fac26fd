//! Survey completion model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use survex_core::types::{DbId, Timestamp, UserId};

use crate::models::survey::Survey;

/// Full row from the `survey_completions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Completion {
    pub id: DbId,
    pub user_id: UserId,
    pub survey_id: DbId,
    pub completed_at: Timestamp,
    pub verified: bool,
}

/// A completion with the survey it refers to.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionWithSurvey {
    #[serde(flatten)]
    pub completion: Completion,
    pub survey: Survey,
}

/// Flat row of a `survey_completions JOIN surveys` query. Survey columns
/// keep their names; completion columns are aliased.
#[derive(Debug, FromRow)]
pub(crate) struct CompletionSurveyRow {
    #[sqlx(flatten)]
    pub survey: Survey,
    pub completion_id: DbId,
    pub completion_user_id: UserId,
    pub completed_at: Timestamp,
    pub verified: bool,
}

impl From<CompletionSurveyRow> for CompletionWithSurvey {
    fn from(row: CompletionSurveyRow) -> Self {
        let completion = Completion {
            id: row.completion_id,
            user_id: row.completion_user_id,
            survey_id: row.survey.id,
            completed_at: row.completed_at,
            verified: row.verified,
        };
        Self {
            completion,
            survey: row.survey,
        }
    }
}

/// DTO for recording a completion.
#[derive(Debug, Clone, Copy)]
pub struct RecordCompletion {
    pub user_id: UserId,
    pub survey_id: DbId,
    /// Points added to the user's total.
    pub points: i64,
}

/// What happened when a completion was recorded.
///
/// Rejections are ordinary outcomes here; the API layer turns them into
/// domain errors.
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Recorded {
        completion: Completion,
        /// The user's `surveys_completed` after the increment.
        surveys_completed: i64,
        /// Badges awarded by this completion.
        new_badges: Vec<DbId>,
    },
    SurveyNotFound,
    SurveyInactive,
    Duplicate,
    OwnSurvey,
}
