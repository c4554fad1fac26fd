//! Domain logic for the survey exchange.
//!
//! Everything here is pure: no database access, no HTTP. The `db` and `api`
//! crates call into these modules to decide what to persist and what to
//! reject.

pub mod badges;
pub mod eligibility;
pub mod error;
pub mod leaderboard;
pub mod pagination;
pub mod ranking;
pub mod scoring;
pub mod survey;
pub mod types;
