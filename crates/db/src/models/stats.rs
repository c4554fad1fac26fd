//! Platform-wide counters.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    /// Active surveys only.
    pub total_surveys: i64,
    pub total_completions: i64,
}
