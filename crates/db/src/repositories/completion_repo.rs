//! Repository for the `survey_completions` table.

use sqlx::PgPool;
use survex_core::badges::BadgeProgress;
use survex_core::types::{DbId, UserId};

use crate::models::completion::{
    Completion, CompletionSurveyRow, CompletionWithSurvey, RecordCompletion, RecordOutcome,
};
use crate::repositories::{BadgeRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, survey_id, completed_at, verified";

/// Survey columns plus aliased completion columns, for
/// `survey_completions c JOIN surveys s`.
const SURVEY_JOIN_COLUMNS: &str = "s.id, s.user_id, s.title, s.description, s.external_url, \
                                   s.estimated_time_minutes, s.response_count, s.target_responses, \
                                   s.is_active, s.created_at, s.updated_at, \
                                   c.id AS completion_id, c.user_id AS completion_user_id, \
                                   c.completed_at, c.verified";

/// Survey fields the recorder checks before inserting.
#[derive(Debug, sqlx::FromRow)]
struct SurveyGate {
    user_id: UserId,
    is_active: bool,
}

/// Provides completion recording and per-user completion reads.
pub struct CompletionRepo;

impl CompletionRepo {
    /// Record that `input.user_id` completed `input.survey_id`.
    ///
    /// Runs in one transaction: precondition checks, the insert, the counter
    /// increment and badge awards either all land or none do. A concurrent
    /// duplicate that slips past the existence check is caught by the unique
    /// constraint and reported as [`RecordOutcome::Duplicate`].
    pub async fn record(
        pool: &PgPool,
        input: &RecordCompletion,
    ) -> Result<RecordOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let gate = sqlx::query_as::<_, SurveyGate>(
            "SELECT user_id, is_active FROM surveys WHERE id = $1 FOR SHARE",
        )
        .bind(input.survey_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(gate) = gate else {
            return Ok(RecordOutcome::SurveyNotFound);
        };

        let already: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM survey_completions WHERE user_id = $1 AND survey_id = $2",
        )
        .bind(input.user_id)
        .bind(input.survey_id)
        .fetch_optional(&mut *tx)
        .await?;
        if already.is_some() {
            return Ok(RecordOutcome::Duplicate);
        }

        if gate.user_id == input.user_id {
            return Ok(RecordOutcome::OwnSurvey);
        }
        if !gate.is_active {
            return Ok(RecordOutcome::SurveyInactive);
        }

        let query = format!(
            "INSERT INTO survey_completions (user_id, survey_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, survey_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let completion = sqlx::query_as::<_, Completion>(&query)
            .bind(input.user_id)
            .bind(input.survey_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(completion) = completion else {
            return Ok(RecordOutcome::Duplicate);
        };

        let counters = UserRepo::increment_completed(&mut *tx, input.user_id, input.points)
            .await?;

        let progress = BadgeProgress {
            surveys_completed: counters.surveys_completed,
            surveys_posted: counters.surveys_posted,
        };
        let new_badges = BadgeRepo::award_qualifying(&mut *tx, input.user_id, &progress).await?;

        tx.commit().await?;

        Ok(RecordOutcome::Recorded {
            completion,
            surveys_completed: counters.surveys_completed,
            new_badges,
        })
    }

    /// The user's completion of a survey, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: UserId,
        survey_id: DbId,
    ) -> Result<Option<Completion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_completions WHERE user_id = $1 AND survey_id = $2"
        );
        sqlx::query_as::<_, Completion>(&query)
            .bind(user_id)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// Completions by one user with their surveys, most recent first.
    pub async fn list_for_user_with_survey(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<CompletionWithSurvey>, sqlx::Error> {
        let query = format!(
            "SELECT {SURVEY_JOIN_COLUMNS}
             FROM survey_completions c
             JOIN surveys s ON s.id = c.survey_id
             WHERE c.user_id = $1
             ORDER BY c.completed_at DESC, c.id DESC"
        );
        let rows = sqlx::query_as::<_, CompletionSurveyRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CompletionWithSurvey::from).collect())
    }

    /// Ids of every survey the user has completed, ascending.
    pub async fn completed_survey_ids(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT survey_id FROM survey_completions WHERE user_id = $1 ORDER BY survey_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
