//! Badge requirement rules.
//!
//! Badges are a static catalog seeded by migration. Each badge names a
//! counter (`requirement_type`) and the value that counter must reach.

use crate::types::DbId;

pub const REQUIREMENT_SURVEYS_COMPLETED: &str = "surveys_completed";
pub const REQUIREMENT_SURVEYS_POSTED: &str = "surveys_posted";

/// The counter a badge is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    SurveysCompleted,
    SurveysPosted,
}

impl RequirementKind {
    /// Parse a catalog `requirement_type`. Unknown types yield `None` and the
    /// badge is never awarded automatically.
    pub fn parse(requirement_type: &str) -> Option<Self> {
        match requirement_type {
            REQUIREMENT_SURVEYS_COMPLETED => Some(Self::SurveysCompleted),
            REQUIREMENT_SURVEYS_POSTED => Some(Self::SurveysPosted),
            _ => None,
        }
    }
}

/// One catalog rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRequirement {
    pub badge_id: DbId,
    pub kind: RequirementKind,
    pub value: i64,
}

/// A user's counters at the moment badges are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadgeProgress {
    pub surveys_completed: i64,
    pub surveys_posted: i64,
}

impl BadgeRequirement {
    pub fn is_met_by(&self, progress: &BadgeProgress) -> bool {
        let current = match self.kind {
            RequirementKind::SurveysCompleted => progress.surveys_completed,
            RequirementKind::SurveysPosted => progress.surveys_posted,
        };
        current >= self.value
    }
}

/// Ids of every badge whose requirement `progress` satisfies.
///
/// Already-earned badges are included; the persistence layer ignores
/// duplicates.
pub fn qualifying_badges<'a>(
    requirements: impl IntoIterator<Item = &'a BadgeRequirement>,
    progress: &BadgeProgress,
) -> Vec<DbId> {
    requirements
        .into_iter()
        .filter(|r| r.is_met_by(progress))
        .map(|r| r.badge_id)
        .collect()
}
