//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use survex_core::types::{Timestamp, UserId};

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub surveys_completed: i64,
    pub surveys_posted: i64,
    /// Raw stored counter; see [`survex_core::scoring::effective_weekly_count`].
    pub weekly_surveys_completed: i64,
    pub total_points: i64,
    pub last_weekly_reset: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the sign-in upsert.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

impl UpsertUser {
    /// Display name to store: the given name, or the local part of the email.
    pub fn display_name(&self) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Public identity of a survey owner, embedded in joined survey reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyOwner {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(full_name: Option<&str>) -> UpsertUser {
        UpsertUser {
            id: UserId::nil(),
            email: "ada@andrew.cmu.edu".to_string(),
            full_name: full_name.map(str::to_string),
        }
    }

    #[test]
    fn display_name_prefers_given_name() {
        assert_eq!(upsert(Some("Ada Lovelace")).display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        assert_eq!(upsert(None).display_name(), "ada");
        assert_eq!(upsert(Some("  ")).display_name(), "ada");
    }
}
