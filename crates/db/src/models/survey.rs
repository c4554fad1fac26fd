//! Survey entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use survex_core::ranking::{FeedKey, FeedRanked};
use survex_core::types::{DbId, Timestamp, UserId};

use crate::models::user::SurveyOwner;

/// Full survey row from the `surveys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Survey {
    pub id: DbId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub external_url: String,
    pub estimated_time_minutes: i32,
    pub response_count: i32,
    pub target_responses: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FeedRanked for Survey {
    fn feed_key(&self) -> FeedKey {
        FeedKey {
            response_count: self.response_count,
            created_at: self.created_at,
            id: self.id,
        }
    }
}

/// A survey together with its owner, as shown in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyWithOwner {
    #[serde(flatten)]
    pub survey: Survey,
    pub owner: SurveyOwner,
}

impl FeedRanked for SurveyWithOwner {
    fn feed_key(&self) -> FeedKey {
        self.survey.feed_key()
    }
}

/// Flat row of a `surveys JOIN users` query.
#[derive(Debug, FromRow)]
pub(crate) struct SurveyOwnerRow {
    #[sqlx(flatten)]
    pub survey: Survey,
    pub owner_email: String,
    pub owner_full_name: Option<String>,
}

impl From<SurveyOwnerRow> for SurveyWithOwner {
    fn from(row: SurveyOwnerRow) -> Self {
        let owner = SurveyOwner {
            id: row.survey.user_id,
            email: row.owner_email,
            full_name: row.owner_full_name,
        };
        Self {
            survey: row.survey,
            owner,
        }
    }
}

/// DTO for inserting a survey. Built from a validated
/// [`survex_core::survey::SurveyDraft`].
#[derive(Debug, Clone)]
pub struct CreateSurvey {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub external_url: String,
    pub estimated_time_minutes: i32,
    pub response_count: i32,
    pub target_responses: i32,
}

/// Feed query options.
#[derive(Debug, Clone, Copy)]
pub struct FeedQuery {
    /// The user viewing the feed.
    pub viewer: UserId,
    /// Hide surveys the viewer has already completed.
    pub exclude_completed: bool,
    /// Hide the viewer's own surveys.
    pub exclude_own: bool,
    pub limit: i64,
    pub offset: i64,
}
