//! Badge catalog and earned-badge models.

use serde::Serialize;
use sqlx::FromRow;
use survex_core::badges::{BadgeRequirement, RequirementKind};
use survex_core::types::{DbId, Timestamp, UserId};

/// Row from the `badges` catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Badge {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub requirement_type: String,
    pub requirement_value: i64,
    pub created_at: Timestamp,
}

impl Badge {
    /// The rule this badge is awarded by, if its type is understood.
    pub fn requirement(&self) -> Option<BadgeRequirement> {
        RequirementKind::parse(&self.requirement_type).map(|kind| BadgeRequirement {
            badge_id: self.id,
            kind,
            value: self.requirement_value,
        })
    }
}

/// A badge a user has earned.
#[derive(Debug, Clone, Serialize)]
pub struct EarnedBadge {
    /// The `user_badges` row id.
    pub id: DbId,
    pub earned_at: Timestamp,
    pub badge: Badge,
}

/// Flat row of a `user_badges JOIN badges` query.
#[derive(Debug, FromRow)]
pub(crate) struct EarnedBadgeRow {
    pub user_badge_id: DbId,
    pub user_id: UserId,
    pub earned_at: Timestamp,
    #[sqlx(flatten)]
    pub badge: Badge,
}

impl EarnedBadgeRow {
    pub(crate) fn into_parts(self) -> (UserId, EarnedBadge) {
        (
            self.user_id,
            EarnedBadge {
                id: self.user_badge_id,
                earned_at: self.earned_at,
                badge: self.badge,
            },
        )
    }
}
