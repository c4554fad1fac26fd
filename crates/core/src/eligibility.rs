//! Survey-posting eligibility policy.
//!
//! A user may post once they have completed `threshold` surveys from other
//! users. While the platform has fewer than `bypass_supply_ceiling` active
//! surveys the quota is waived.

use serde::Serialize;

use crate::error::CoreError;

/// Completions required before posting, unless the bypass applies.
pub const DEFAULT_POSTING_THRESHOLD: i64 = 6;

/// Active-survey count below which anyone may post.
pub const DEFAULT_BYPASS_SUPPLY_CEILING: i64 = 11;

/// Why a user can or cannot post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityReason {
    /// Too few active surveys on the platform; the quota is waived.
    LowSupplyBypass,
    /// The user has completed enough surveys.
    QuotaMet,
    /// The user still owes completions.
    QuotaNotMet,
}

/// Result of evaluating the policy for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    pub can_post: bool,
    pub reason: EligibilityReason,
    pub surveys_completed: i64,
    pub threshold: i64,
    /// Completions still needed to meet the quota (0 once met).
    pub remaining: i64,
    pub active_surveys: i64,
}

/// Configurable posting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityPolicy {
    pub threshold: i64,
    pub bypass_supply_ceiling: i64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_POSTING_THRESHOLD,
            bypass_supply_ceiling: DEFAULT_BYPASS_SUPPLY_CEILING,
        }
    }
}

impl EligibilityPolicy {
    /// Build a policy, rejecting negative values.
    pub fn new(threshold: i64, bypass_supply_ceiling: i64) -> Result<Self, CoreError> {
        if threshold < 0 {
            return Err(CoreError::Validation(format!(
                "Posting threshold must be non-negative, got {threshold}"
            )));
        }
        if bypass_supply_ceiling < 0 {
            return Err(CoreError::Validation(format!(
                "Bypass supply ceiling must be non-negative, got {bypass_supply_ceiling}"
            )));
        }
        Ok(Self {
            threshold,
            bypass_supply_ceiling,
        })
    }

    /// Evaluate the policy for a user with `surveys_completed` completions
    /// while `active_surveys` surveys are live on the platform.
    pub fn evaluate(&self, surveys_completed: i64, active_surveys: i64) -> Eligibility {
        let quota_met = surveys_completed >= self.threshold;
        let bypass = active_surveys < self.bypass_supply_ceiling;

        // A met quota is reported even when the bypass also applies.
        let reason = if quota_met {
            EligibilityReason::QuotaMet
        } else if bypass {
            EligibilityReason::LowSupplyBypass
        } else {
            EligibilityReason::QuotaNotMet
        };

        Eligibility {
            can_post: quota_met || bypass,
            reason,
            surveys_completed,
            threshold: self.threshold,
            remaining: (self.threshold - surveys_completed).max(0),
            active_surveys,
        }
    }

    /// Like [`evaluate`](Self::evaluate) but fails with
    /// [`CoreError::NotEligible`] when posting is not allowed.
    pub fn ensure_can_post(
        &self,
        surveys_completed: i64,
        active_surveys: i64,
    ) -> Result<Eligibility, CoreError> {
        let eligibility = self.evaluate(surveys_completed, active_surveys);
        if !eligibility.can_post {
            return Err(CoreError::NotEligible {
                completed: surveys_completed,
                required: self.threshold,
            });
        }
        Ok(eligibility)
    }
}
