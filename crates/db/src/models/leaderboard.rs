//! Leaderboard rows.

use serde::Serialize;
use sqlx::FromRow;
use survex_core::types::UserId;

use crate::models::badge::EarnedBadge;

/// One user's leaderboard standing, before ranks are assigned.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub surveys_completed: i64,
    /// Completions this week; zero when the stored counter is stale.
    pub weekly_surveys_completed: i64,
    pub total_points: i64,
    pub badges: Vec<EarnedBadge>,
}

#[derive(Debug, FromRow)]
pub(crate) struct LeaderboardRow {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub surveys_completed: i64,
    pub effective_weekly: i64,
    pub total_points: i64,
}

impl LeaderboardRow {
    pub(crate) fn with_badges(self, badges: Vec<EarnedBadge>) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: self.id,
            email: self.email,
            full_name: self.full_name,
            surveys_completed: self.surveys_completed,
            weekly_surveys_completed: self.effective_weekly,
            total_points: self.total_points,
            badges,
        }
    }
}
