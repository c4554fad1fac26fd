/// Surveys, completions and badges use PostgreSQL BIGSERIAL keys.
pub type DbId = i64;

/// Users are keyed by the identity provider's subject id.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
