//! Platform-wide counts.

use sqlx::PgPool;

use crate::models::stats::PlatformStats;

pub struct StatsRepo;

impl StatsRepo {
    /// Users, active surveys and completions, in one round trip.
    pub async fn platform(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        sqlx::query_as::<_, PlatformStats>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM surveys WHERE is_active = true) AS total_surveys,
                (SELECT COUNT(*) FROM survey_completions) AS total_completions",
        )
        .fetch_one(pool)
        .await
    }
}
