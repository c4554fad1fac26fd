//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Explicit value objects for joined reads (no untyped nested JSON)
//! - `Deserialize`-free input DTOs built by the API layer

pub mod badge;
pub mod completion;
pub mod leaderboard;
pub mod stats;
pub mod survey;
pub mod user;
