//! Shared query parameter types for API handlers.

use serde::Deserialize;
use survex_core::leaderboard::LeaderboardScope;

/// Query parameters for `GET /surveys` (`?limit=&offset=&exclude_completed=&exclude_own=`).
///
/// Limit and offset are clamped with `survex_core::pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub exclude_completed: bool,
    #[serde(default)]
    pub exclude_own: bool,
}

/// Query parameters for `GET /leaderboard` (`?limit=&scope=all_time|weekly`).
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
    #[serde(default)]
    pub scope: LeaderboardScope,
}
