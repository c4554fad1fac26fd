//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes open their
//! own transaction.

pub mod badge_repo;
pub mod completion_repo;
pub mod leaderboard_repo;
pub mod stats_repo;
pub mod survey_repo;
pub mod user_repo;

pub use badge_repo::BadgeRepo;
pub use completion_repo::CompletionRepo;
pub use leaderboard_repo::LeaderboardRepo;
pub use stats_repo::StatsRepo;
pub use survey_repo::SurveyRepo;
pub use user_repo::UserRepo;

/// Start of the current week (Monday 00:00 UTC) as a SQL expression.
pub(crate) const WEEK_START_SQL: &str =
    "(date_trunc('week', NOW() AT TIME ZONE 'UTC') AT TIME ZONE 'UTC')";
