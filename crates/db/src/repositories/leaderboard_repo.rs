//! Leaderboard reads over the `users` table.

use sqlx::PgPool;
use survex_core::leaderboard::{assign_ranks, LeaderboardScope, Ranked};
use survex_core::types::UserId;

use crate::models::leaderboard::{LeaderboardEntry, LeaderboardRow};
use crate::repositories::{BadgeRepo, WEEK_START_SQL};

pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// The top `limit` users for `scope`, ranked 1..=n with badges attached.
    ///
    /// Ties break on earliest sign-up, then id. `limit` is expected to be
    /// clamped by the caller.
    pub async fn top(
        pool: &PgPool,
        scope: LeaderboardScope,
        limit: i64,
    ) -> Result<Vec<Ranked<LeaderboardEntry>>, sqlx::Error> {
        let order = scope.order_column();
        let query = format!(
            "SELECT id, email, full_name, surveys_completed, total_points, effective_weekly
             FROM (
                SELECT id, email, full_name, surveys_completed, total_points, created_at,
                       CASE WHEN last_weekly_reset < {WEEK_START_SQL} THEN 0::bigint
                            ELSE weekly_surveys_completed
                       END AS effective_weekly
                FROM users
             ) u
             ORDER BY {order} DESC, created_at ASC, id ASC
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, LeaderboardRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let user_ids: Vec<UserId> = rows.iter().map(|r| r.id).collect();
        let mut badges = BadgeRepo::list_for_users(pool, &user_ids).await?;

        let entries = rows
            .into_iter()
            .map(|row| {
                let earned = badges.remove(&row.id).unwrap_or_default();
                row.with_badges(earned)
            })
            .collect();
        Ok(assign_ranks(entries))
    }
}
