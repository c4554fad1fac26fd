//! Repository for the `badges` catalog and `user_badges` awards.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use survex_core::badges::{qualifying_badges, BadgeProgress, BadgeRequirement};
use survex_core::types::{DbId, UserId};

use crate::models::badge::{Badge, EarnedBadge, EarnedBadgeRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, icon, requirement_type, requirement_value, created_at";

/// Catalog columns prefixed for joins against `user_badges ub`.
const JOINED_COLUMNS: &str = "ub.id AS user_badge_id, ub.user_id, ub.earned_at, \
                              b.id, b.name, b.description, b.icon, b.requirement_type, \
                              b.requirement_value, b.created_at";

/// Provides catalog reads and badge awarding.
pub struct BadgeRepo;

impl BadgeRepo {
    /// The full catalog, easiest badges first.
    pub async fn list_catalog(pool: &PgPool) -> Result<Vec<Badge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges ORDER BY requirement_value ASC, id ASC");
        sqlx::query_as::<_, Badge>(&query).fetch_all(pool).await
    }

    /// Badges earned by one user, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<EarnedBadge>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM user_badges ub
             JOIN badges b ON b.id = ub.badge_id
             WHERE ub.user_id = $1
             ORDER BY ub.earned_at DESC, ub.id DESC"
        );
        let rows = sqlx::query_as::<_, EarnedBadgeRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|row| row.into_parts().1).collect())
    }

    /// Badges earned by each of `user_ids`, in one round trip.
    ///
    /// Users with no badges are absent from the map.
    pub async fn list_for_users(
        pool: &PgPool,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, Vec<EarnedBadge>>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM user_badges ub
             JOIN badges b ON b.id = ub.badge_id
             WHERE ub.user_id = ANY($1)
             ORDER BY ub.earned_at DESC, ub.id DESC"
        );
        let rows = sqlx::query_as::<_, EarnedBadgeRow>(&query)
            .bind(user_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<UserId, Vec<EarnedBadge>> = HashMap::new();
        for row in rows {
            let (user_id, badge) = row.into_parts();
            grouped.entry(user_id).or_default().push(badge);
        }
        Ok(grouped)
    }

    /// Award every catalog badge `progress` satisfies, inside an open
    /// transaction. Returns only the badges newly earned by this call.
    pub async fn award_qualifying(
        conn: &mut PgConnection,
        user_id: UserId,
        progress: &BadgeProgress,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges");
        let catalog = sqlx::query_as::<_, Badge>(&query)
            .fetch_all(&mut *conn)
            .await?;

        let requirements: Vec<BadgeRequirement> =
            catalog.iter().filter_map(Badge::requirement).collect();
        let qualifying = qualifying_badges(&requirements, progress);
        if qualifying.is_empty() {
            return Ok(Vec::new());
        }

        let awarded: Vec<(DbId,)> = sqlx::query_as(
            "INSERT INTO user_badges (user_id, badge_id)
             SELECT $1, badge_id FROM UNNEST($2::bigint[]) AS t(badge_id)
             ON CONFLICT (user_id, badge_id) DO NOTHING
             RETURNING badge_id",
        )
        .bind(user_id)
        .bind(&qualifying)
        .fetch_all(&mut *conn)
        .await?;

        let awarded: Vec<DbId> = awarded.into_iter().map(|(id,)| id).collect();
        if !awarded.is_empty() {
            tracing::debug!(%user_id, badges = ?awarded, "Badges awarded");
        }
        Ok(awarded)
    }
}
