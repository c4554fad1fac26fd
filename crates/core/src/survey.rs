//! Survey draft validation.
//!
//! A draft is what a user submits when posting a survey. Field-level rules
//! are declared with `validator`; the cross-cutting checks (blank text,
//! http(s)-only links) are applied on top.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

pub const MAX_TITLE_LENGTH: u64 = 200;
pub const MAX_DESCRIPTION_LENGTH: u64 = 5000;
pub const MIN_ESTIMATED_MINUTES: i32 = 1;
pub const MAX_ESTIMATED_MINUTES: i32 = 60;
pub const MIN_TARGET_RESPONSES: i32 = 1;
pub const DEFAULT_TARGET_RESPONSES: i32 = 50;
pub const MAX_TARGET_RESPONSES: i32 = 500;

/// Body of a post-survey request.
///
/// Bounded fields carry no message of their own; [`describe`] renders one
/// from the bounds `validator` reports, so the text follows the constants.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SurveyDraft {
    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(url(message = "Survey URL must be a valid URL"))]
    pub external_url: String,

    #[validate(range(min = MIN_ESTIMATED_MINUTES, max = MAX_ESTIMATED_MINUTES))]
    pub estimated_time_minutes: i32,

    #[validate(range(min = MIN_TARGET_RESPONSES, max = MAX_TARGET_RESPONSES))]
    pub target_responses: Option<i32>,

    /// Responses the survey already has elsewhere; seeds `response_count`.
    #[validate(range(min = 0, message = "Existing responses cannot be negative"))]
    pub existing_response_count: Option<i32>,
}

impl SurveyDraft {
    pub fn target_responses_or_default(&self) -> i32 {
        self.target_responses.unwrap_or(DEFAULT_TARGET_RESPONSES)
    }

    pub fn initial_response_count(&self) -> i32 {
        self.existing_response_count.unwrap_or(0)
    }
}

/// Validate a draft, returning every problem in one message.
pub fn validate_survey_draft(draft: &SurveyDraft) -> Result<(), CoreError> {
    let mut problems = Vec::new();

    if draft.title.trim().is_empty() {
        problems.push("Title is required".to_string());
    }
    if draft.description.trim().is_empty() {
        problems.push("Description is required".to_string());
    }
    if draft.external_url.trim().is_empty() {
        problems.push("Survey URL is required".to_string());
    } else if !has_web_scheme(&draft.external_url) {
        problems.push("Survey URL must start with http:// or https://".to_string());
    }

    if let Err(errors) = draft.validate() {
        problems.extend(describe(&errors));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        problems.dedup();
        Err(CoreError::Validation(problems.join("; ")))
    }
}

fn has_web_scheme(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Flatten `validator` field errors into messages, ordered by field name.
fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => render(&field, e),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn render(field: &str, error: &ValidationError) -> String {
    let label = match field {
        "title" => "Title",
        "description" => "Description",
        "estimated_time_minutes" => "Time",
        "target_responses" => "Target responses",
        other => other,
    };
    let bound = |name: &str| error.params.get(name).map(ToString::to_string);

    match (&*error.code, bound("min"), bound("max")) {
        ("range", Some(min), Some(max)) if field == "estimated_time_minutes" => {
            format!("{label} must be between {min} and {max} minutes")
        }
        ("range", Some(min), Some(max)) => format!("{label} must be between {min} and {max}"),
        ("length", _, Some(max)) => format!("{label} must be at most {max} characters"),
        _ => format!("{label} is invalid"),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn draft() -> SurveyDraft {
        SurveyDraft {
            title: "Sleep habits of first-years".to_string(),
            description: "Ten questions about sleep schedules.".to_string(),
            external_url: "https://forms.example.com/sleep".to_string(),
            estimated_time_minutes: 5,
            target_responses: None,
            existing_response_count: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_survey_draft(&draft()).is_ok());
    }

    #[test]
    fn defaults_apply() {
        let d = draft();
        assert_eq!(d.target_responses_or_default(), DEFAULT_TARGET_RESPONSES);
        assert_eq!(d.initial_response_count(), 0);
    }

    #[test]
    fn blank_title_rejected() {
        let d = SurveyDraft {
            title: "   ".to_string(),
            ..draft()
        };
        let err = validate_survey_draft(&d).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Title is required"));
    }

    #[test]
    fn non_web_url_rejected() {
        let d = SurveyDraft {
            external_url: "ftp://files.example.com/survey".to_string(),
            ..draft()
        };
        let err = validate_survey_draft(&d).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("http://"));
    }

    #[test]
    fn garbage_url_rejected() {
        let d = SurveyDraft {
            external_url: "not a url".to_string(),
            ..draft()
        };
        assert!(validate_survey_draft(&d).is_err());
    }

    #[test]
    fn duration_bounds() {
        for minutes in [0, 61, -5] {
            let d = SurveyDraft {
                estimated_time_minutes: minutes,
                ..draft()
            };
            let err = validate_survey_draft(&d).unwrap_err();
            assert_matches!(err, CoreError::Validation(msg) if msg.contains("between 1 and 60"));
        }
        for minutes in [MIN_ESTIMATED_MINUTES, MAX_ESTIMATED_MINUTES] {
            let d = SurveyDraft {
                estimated_time_minutes: minutes,
                ..draft()
            };
            assert!(validate_survey_draft(&d).is_ok());
        }
    }

    #[test]
    fn target_and_existing_counts_checked() {
        let d = SurveyDraft {
            target_responses: Some(MAX_TARGET_RESPONSES + 1),
            existing_response_count: Some(-1),
            ..draft()
        };
        let err = validate_survey_draft(&d).unwrap_err();
        assert_matches!(
            err,
            CoreError::Validation(msg)
                if msg.contains("Target responses") && msg.contains("cannot be negative")
        );
    }

    #[test]
    fn overlong_title_rejected() {
        let d = SurveyDraft {
            title: "x".repeat(MAX_TITLE_LENGTH as usize + 1),
            ..draft()
        };
        assert!(validate_survey_draft(&d).is_err());
    }

    #[test]
    fn bound_messages_follow_constants() {
        let d = SurveyDraft {
            title: "x".repeat(MAX_TITLE_LENGTH as usize + 1),
            estimated_time_minutes: MAX_ESTIMATED_MINUTES + 1,
            ..draft()
        };
        let err = validate_survey_draft(&d).unwrap_err();
        let expected_time = format!(
            "Time must be between {MIN_ESTIMATED_MINUTES} and {MAX_ESTIMATED_MINUTES} minutes"
        );
        let expected_title = format!("Title must be at most {MAX_TITLE_LENGTH} characters");
        assert_matches!(
            err,
            CoreError::Validation(msg)
                if msg.contains(&expected_time) && msg.contains(&expected_title)
        );
    }
}
