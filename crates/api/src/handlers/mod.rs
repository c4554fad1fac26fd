pub mod badge;
pub mod eligibility;
pub mod leaderboard;
pub mod me;
pub mod session;
pub mod stats;
pub mod survey;
