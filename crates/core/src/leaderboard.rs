//! Leaderboard ranking.

use serde::{Deserialize, Serialize};

use crate::pagination::clamp_limit;

/// Default number of leaderboard entries.
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 50;

/// Largest leaderboard a caller may request.
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// Which counter the leaderboard is ranked by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardScope {
    /// Lifetime `surveys_completed`.
    #[default]
    AllTime,
    /// Completions since the start of the current week.
    Weekly,
}

impl LeaderboardScope {
    /// Column the persistence layer sorts by for this scope.
    pub fn order_column(self) -> &'static str {
        match self {
            Self::AllTime => "surveys_completed",
            Self::Weekly => "effective_weekly",
        }
    }
}

/// An entry paired with its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: i64,
    #[serde(flatten)]
    pub entry: T,
}

/// Number already-sorted entries 1, 2, 3, ...
///
/// Entries with equal scores still get distinct ranks; their relative order
/// is whatever the caller sorted them into.
pub fn assign_ranks<T>(sorted: Vec<T>) -> Vec<Ranked<T>> {
    sorted
        .into_iter()
        .zip(1..)
        .map(|(entry, rank)| Ranked { rank, entry })
        .collect()
}

/// Clamp a requested leaderboard size into `[1, MAX_LEADERBOARD_LIMIT]`.
pub fn clamp_leaderboard_limit(limit: Option<i64>) -> i64 {
    clamp_limit(limit, DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT)
}
