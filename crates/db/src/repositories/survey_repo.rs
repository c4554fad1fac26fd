//! Repository for the `surveys` table.

use sqlx::PgPool;
use survex_core::badges::BadgeProgress;
use survex_core::ranking::FEED_ORDER_BY;
use survex_core::types::{DbId, UserId};

use crate::models::survey::{CreateSurvey, FeedQuery, Survey, SurveyOwnerRow, SurveyWithOwner};
use crate::repositories::{BadgeRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, external_url, estimated_time_minutes, \
                       response_count, target_responses, is_active, created_at, updated_at";

/// Survey columns qualified with the `s` alias plus the owner's columns.
const OWNER_JOIN_COLUMNS: &str = "s.id, s.user_id, s.title, s.description, s.external_url, \
                                  s.estimated_time_minutes, s.response_count, s.target_responses, \
                                  s.is_active, s.created_at, s.updated_at, \
                                  u.email AS owner_email, u.full_name AS owner_full_name";

/// A freshly posted survey and the badges the post earned.
#[derive(Debug, Clone)]
pub struct CreatedSurvey {
    pub survey: Survey,
    pub new_badges: Vec<DbId>,
}

/// Provides creation, feed reads, and soft deactivation for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a survey and bump the owner's `surveys_posted`, in one
    /// transaction. Posting badges are awarded in the same transaction.
    ///
    /// Eligibility is the caller's responsibility.
    pub async fn create(pool: &PgPool, input: &CreateSurvey) -> Result<CreatedSurvey, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO surveys
                (user_id, title, description, external_url, estimated_time_minutes,
                 response_count, target_responses)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let survey = sqlx::query_as::<_, Survey>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.external_url)
            .bind(input.estimated_time_minutes)
            .bind(input.response_count)
            .bind(input.target_responses)
            .fetch_one(&mut *tx)
            .await?;

        let counters = UserRepo::increment_posted(&mut *tx, input.user_id)
            .await?;

        let progress = BadgeProgress {
            surveys_completed: counters.surveys_completed,
            surveys_posted: counters.surveys_posted,
        };
        let new_badges = BadgeRepo::award_qualifying(&mut *tx, input.user_id, &progress).await?;

        tx.commit().await?;
        Ok(CreatedSurvey { survey, new_badges })
    }

    /// Find a survey by id, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a survey with its owner embedded.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SurveyWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNER_JOIN_COLUMNS}
             FROM surveys s
             JOIN users u ON u.id = s.user_id
             WHERE s.id = $1"
        );
        let row = sqlx::query_as::<_, SurveyOwnerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SurveyWithOwner::from))
    }

    /// One page of the active-survey feed, fewest responses first.
    pub async fn list_feed(
        pool: &PgPool,
        params: &FeedQuery,
    ) -> Result<Vec<SurveyWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNER_JOIN_COLUMNS}
             FROM surveys s
             JOIN users u ON u.id = s.user_id
             WHERE s.is_active = true
               AND (NOT $2 OR s.user_id <> $1)
               AND (NOT $3 OR NOT EXISTS (
                    SELECT 1 FROM survey_completions c
                    WHERE c.survey_id = s.id AND c.user_id = $1))
             ORDER BY {FEED_ORDER_BY}
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, SurveyOwnerRow>(&query)
            .bind(params.viewer)
            .bind(params.exclude_own)
            .bind(params.exclude_completed)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SurveyWithOwner::from).collect())
    }

    /// Every survey a user has posted, newest first, including inactive ones.
    pub async fn list_by_owner(pool: &PgPool, user_id: UserId) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM surveys
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count active surveys across the platform.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM surveys WHERE is_active = true")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Soft-deactivate a survey owned by `owner`.
    ///
    /// Returns `None` if no active survey with that id belongs to `owner`.
    pub async fn deactivate(
        pool: &PgPool,
        id: DbId,
        owner: UserId,
    ) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!(
            "UPDATE surveys SET is_active = false
             WHERE id = $1 AND user_id = $2 AND is_active = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }
}
