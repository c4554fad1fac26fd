use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Not eligible to post: {completed} of {required} surveys completed")]
    NotEligible { completed: i64, required: i64 },

    #[error("Survey {survey_id} has already been completed by this user")]
    DuplicateCompletion { survey_id: DbId },

    #[error("Survey {survey_id} belongs to this user and cannot be completed by them")]
    SelfCompletionForbidden { survey_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
