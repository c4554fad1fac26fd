//! Points and weekly counters.
//!
//! Weeks start Monday 00:00 UTC, matching PostgreSQL's
//! `date_trunc('week', ...)` so the database and this module agree on when
//! a weekly counter goes stale.

use chrono::{Datelike, Duration, NaiveTime};

use crate::types::Timestamp;

/// Points granted for each completed survey.
pub const POINTS_PER_COMPLETION: i64 = 10;

/// Start of the week containing `now`.
pub fn week_start(now: Timestamp) -> Timestamp {
    let days_from_monday = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date_naive() - Duration::days(days_from_monday);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// The weekly completion count as of `now`.
///
/// The stored counter is only reset on the next completion, so a value
/// recorded in an earlier week reads as zero.
pub fn effective_weekly_count(stored: i64, last_weekly_reset: Timestamp, now: Timestamp) -> i64 {
    if last_weekly_reset < week_start(now) {
        0
    } else {
        stored
    }
}
