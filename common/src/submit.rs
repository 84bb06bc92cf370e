//! Form draft and validation for the submit path.
//!
//! The three-step form edits a [`ReviewDraft`]; each step is validated
//! before advancing, and [`ReviewDraft::validate`] is the single gate in
//! front of the network — a draft that fails it never produces an insert
//! request. Validation trims text, clamps the rating, and turns empty
//! optional fields into `None` so the service stores explicit nulls.

use thiserror::Error;

use crate::model::review::{MAX_RATING, MIN_RATING, NewReview, Role};

/// Minimum submitter name length, after trimming.
pub const MIN_NAME_LEN: usize = 2;
/// Minimum experience narrative length, after trimming.
pub const MIN_EXPERIENCE_LEN: usize = 10;
/// Steps in the feedback form.
pub const FORM_STEPS: usize = 3;
/// Rating at which a successful submission triggers the confetti burst.
pub const CELEBRATION_THRESHOLD: u8 = 5;

/// The five optional category textareas on the last form step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Security,
    Bugs,
    Database,
    Features,
    UiUx,
    Other,
}

impl CategoryField {
    pub const ALL: [CategoryField; 6] = [
        CategoryField::Security,
        CategoryField::Bugs,
        CategoryField::Database,
        CategoryField::Features,
        CategoryField::UiUx,
        CategoryField::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryField::Security => "Security issues",
            CategoryField::Bugs => "Bugs & glitches",
            CategoryField::Database => "Data & sync issues",
            CategoryField::Features => "Feature requests",
            CategoryField::UiUx => "UI / UX feedback",
            CategoryField::Other => "Anything else",
        }
    }
}

/// Field-level validation failure, worded for direct display next to the
/// offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please tell us your name (at least {MIN_NAME_LEN} characters).")]
    NameTooShort,
    #[error("Please choose whether you are a student or faculty.")]
    RoleMissing,
    #[error("Please pick a star rating.")]
    RatingMissing,
    #[error("Please describe your experience (at least {MIN_EXPERIENCE_LEN} characters).")]
    ExperienceTooShort,
    #[error("Please rate how reliable it felt.")]
    ReliabilityMissing,
    #[error("Please tell us whether you would recommend it.")]
    RecommendMissing,
}

/// Everything the form is currently holding. `rating` and
/// `reliability_rating` use 0 for "not picked yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub name: String,
    pub role: Option<Role>,
    pub rating: u8,
    pub experience: String,
    pub reliability_rating: u8,
    pub would_recommend: Option<bool>,
    pub security_issues: String,
    pub bugs_glitches: String,
    pub database_issues: String,
    pub feature_requests: String,
    pub ui_ux_feedback: String,
    pub other_feedback: String,
}

impl ReviewDraft {
    pub fn category(&self, field: CategoryField) -> &str {
        match field {
            CategoryField::Security => &self.security_issues,
            CategoryField::Bugs => &self.bugs_glitches,
            CategoryField::Database => &self.database_issues,
            CategoryField::Features => &self.feature_requests,
            CategoryField::UiUx => &self.ui_ux_feedback,
            CategoryField::Other => &self.other_feedback,
        }
    }

    pub fn set_category(&mut self, field: CategoryField, value: String) {
        let slot = match field {
            CategoryField::Security => &mut self.security_issues,
            CategoryField::Bugs => &mut self.bugs_glitches,
            CategoryField::Database => &mut self.database_issues,
            CategoryField::Features => &mut self.feature_requests,
            CategoryField::UiUx => &mut self.ui_ux_feedback,
            CategoryField::Other => &mut self.other_feedback,
        };
        *slot = value;
    }

    /// Checks only the fields shown on `step`. The category step has no
    /// required fields, so it always passes.
    pub fn validate_step(&self, step: usize) -> Result<(), ValidationError> {
        match step {
            0 => {
                if self.name.trim().chars().count() < MIN_NAME_LEN {
                    return Err(ValidationError::NameTooShort);
                }
                if self.role.is_none() {
                    return Err(ValidationError::RoleMissing);
                }
                if self.rating == 0 {
                    return Err(ValidationError::RatingMissing);
                }
                Ok(())
            }
            1 => {
                if self.experience.trim().chars().count() < MIN_EXPERIENCE_LEN {
                    return Err(ValidationError::ExperienceTooShort);
                }
                if self.reliability_rating == 0 {
                    return Err(ValidationError::ReliabilityMissing);
                }
                if self.would_recommend.is_none() {
                    return Err(ValidationError::RecommendMissing);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Validates the whole draft and builds the insert payload.
    ///
    /// This is the only constructor of [`NewReview`], so anything that
    /// reaches the network is trimmed, clamped, and null-normalised.
    pub fn validate(&self) -> Result<NewReview, ValidationError> {
        for step in 0..FORM_STEPS {
            self.validate_step(step)?;
        }
        let role = self.role.ok_or(ValidationError::RoleMissing)?;
        let would_recommend = self
            .would_recommend
            .ok_or(ValidationError::RecommendMissing)?;

        Ok(NewReview {
            name: self.name.trim().to_string(),
            role,
            rating: clamp_stars(self.rating),
            experience: self.experience.trim().to_string(),
            reliability_rating: clamp_stars(self.reliability_rating),
            would_recommend,
            security_issues: optional(&self.security_issues),
            bugs_glitches: optional(&self.bugs_glitches),
            database_issues: optional(&self.database_issues),
            feature_requests: optional(&self.feature_requests),
            ui_ux_feedback: optional(&self.ui_ux_feedback),
            other_feedback: optional(&self.other_feedback),
        })
    }
}

/// Whether a successful submission with this rating gets the confetti.
pub fn deserves_celebration(rating: u8) -> bool {
    rating >= CELEBRATION_THRESHOLD
}

fn clamp_stars(value: u8) -> u8 {
    value.clamp(MIN_RATING as u8, MAX_RATING as u8)
}

/// Trimmed text, or `None` when nothing is left — stored as explicit null,
/// never as an empty string.
fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn complete_draft() -> ReviewDraft {
        ReviewDraft {
            name: "  Asha  ".to_string(),
            role: Some(Role::Student),
            rating: 4,
            experience: "Used it every week this term.".to_string(),
            reliability_rating: 5,
            would_recommend: Some(true),
            feature_requests: "   ".to_string(),
            other_feedback: " more quiz modes please ".to_string(),
            ..ReviewDraft::default()
        }
    }

    #[test]
    fn valid_draft_builds_a_trimmed_payload() {
        let payload = complete_draft().validate().unwrap();
        assert_eq!(payload.name, "Asha");
        assert_eq!(payload.rating, 4);
        // Whitespace-only optional field becomes an explicit null.
        assert_eq!(payload.feature_requests, None);
        assert_eq!(
            payload.other_feedback.as_deref(),
            Some("more quiz modes please")
        );
    }

    #[rstest]
    #[case("", ValidationError::NameTooShort)]
    #[case("A", ValidationError::NameTooShort)]
    #[case(" A ", ValidationError::NameTooShort)]
    fn short_names_never_reach_the_network(
        #[case] name: &str,
        #[case] expected: ValidationError,
    ) {
        let draft = ReviewDraft {
            name: name.to_string(),
            ..complete_draft()
        };
        assert_eq!(draft.validate().unwrap_err(), expected);
    }

    #[test]
    fn missing_choices_are_reported_field_by_field() {
        let mut draft = complete_draft();
        draft.role = None;
        assert_eq!(draft.validate().unwrap_err(), ValidationError::RoleMissing);

        let mut draft = complete_draft();
        draft.rating = 0;
        assert_eq!(draft.validate().unwrap_err(), ValidationError::RatingMissing);

        let mut draft = complete_draft();
        draft.would_recommend = None;
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::RecommendMissing
        );
    }

    #[test]
    fn step_validation_gates_only_that_steps_fields() {
        let draft = ReviewDraft {
            name: "Mei".to_string(),
            role: Some(Role::Faculty),
            rating: 3,
            ..ReviewDraft::default()
        };
        // Step 0 complete, step 1 still empty.
        assert!(draft.validate_step(0).is_ok());
        assert_eq!(
            draft.validate_step(1).unwrap_err(),
            ValidationError::ExperienceTooShort
        );
        // The optional category step never blocks.
        assert!(draft.validate_step(2).is_ok());
    }

    #[test]
    fn experience_shorter_than_minimum_is_rejected() {
        let mut draft = complete_draft();
        draft.experience = "Nice.".to_string();
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::ExperienceTooShort
        );
    }

    #[test]
    fn out_of_range_draft_rating_is_clamped_in_the_payload() {
        let mut draft = complete_draft();
        draft.rating = 9;
        assert_eq!(draft.validate().unwrap().rating, 5);
    }

    #[rstest]
    #[case(5, true)]
    #[case(4, false)]
    #[case(1, false)]
    fn celebration_fires_only_at_the_threshold(#[case] rating: u8, #[case] expected: bool) {
        assert_eq!(deserves_celebration(rating), expected);
    }

    #[test]
    fn category_accessors_round_trip() {
        let mut draft = ReviewDraft::default();
        draft.set_category(CategoryField::Bugs, "star picker sticks".to_string());
        assert_eq!(draft.category(CategoryField::Bugs), "star picker sticks");
        assert_eq!(draft.category(CategoryField::Security), "");
    }
}
