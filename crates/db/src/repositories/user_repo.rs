//! Repository for the `users` table.

use sqlx::{PgConnection, PgPool};
use survex_core::types::UserId;

use crate::models::user::{UpsertUser, User};
use crate::repositories::WEEK_START_SQL;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, full_name, surveys_completed, surveys_posted, \
                       weekly_surveys_completed, total_points, last_weekly_reset, \
                       created_at, updated_at";

/// Counters after an increment, returned to callers that award badges.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct UserCounters {
    pub surveys_completed: i64,
    pub surveys_posted: i64,
}

/// Provides lookups, the sign-in upsert, and counter maintenance for users.
pub struct UserRepo;

impl UserRepo {
    /// Create the user on first sign-in, or refresh email and display name.
    ///
    /// Counters are never touched by the upsert.
    pub async fn upsert(pool: &PgPool, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, full_name)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                full_name = EXCLUDED.full_name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.id)
            .bind(&input.email)
            .bind(input.display_name())
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the user, creating it from `input` if it does not exist yet.
    pub async fn find_or_create(pool: &PgPool, input: &UpsertUser) -> Result<User, sqlx::Error> {
        match Self::find_by_id(pool, input.id).await? {
            Some(user) => Ok(user),
            None => Self::upsert(pool, input).await,
        }
    }

    /// Add one completion to the user's counters inside an open transaction.
    ///
    /// Also adds `points` and bumps the weekly counter, restarting it at 1
    /// when the last reset predates the current week. Callers insert a row
    /// referencing the user first, so the foreign key guarantees it exists.
    pub async fn increment_completed(
        conn: &mut PgConnection,
        id: UserId,
        points: i64,
    ) -> Result<UserCounters, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                surveys_completed = surveys_completed + 1,
                total_points = total_points + $2,
                weekly_surveys_completed = CASE
                    WHEN last_weekly_reset < {WEEK_START_SQL} THEN 1
                    ELSE weekly_surveys_completed + 1
                END,
                last_weekly_reset = CASE
                    WHEN last_weekly_reset < {WEEK_START_SQL} THEN {WEEK_START_SQL}
                    ELSE last_weekly_reset
                END
             WHERE id = $1
             RETURNING surveys_completed, surveys_posted"
        );
        sqlx::query_as::<_, UserCounters>(&query)
            .bind(id)
            .bind(points)
            .fetch_one(conn)
            .await
    }

    /// Add one post to the user's counters inside an open transaction.
    pub async fn increment_posted(
        conn: &mut PgConnection,
        id: UserId,
    ) -> Result<UserCounters, sqlx::Error> {
        sqlx::query_as::<_, UserCounters>(
            "UPDATE users SET surveys_posted = surveys_posted + 1
             WHERE id = $1
             RETURNING surveys_completed, surveys_posted",
        )
        .bind(id)
        .fetch_one(conn)
        .await
    }
}
