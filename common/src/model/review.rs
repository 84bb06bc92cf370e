use serde::{Deserialize, Serialize};

/// Lowest rating a star widget can show.
pub const MIN_RATING: i32 = 1;
/// Highest rating a star widget can show.
pub const MAX_RATING: i32 = 5;

/// Submitter category for this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    /// Human-readable label for list items and the form.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty",
        }
    }
}

/// One stored feedback submission, as returned by the remote service.
///
/// `rating` is kept exactly as stored — the service does not guarantee it
/// falls inside [1,5], so every read goes through [`Review::clamped_rating`].
/// Optional text fields come back as `null` when the submitter skipped them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub created_at: String,
    pub name: String,
    pub role: Role,
    pub rating: i32,
    pub experience: Option<String>,
    pub reliability_rating: Option<i32>,
    pub would_recommend: Option<bool>,
    pub security_issues: Option<String>,
    pub bugs_glitches: Option<String>,
    pub database_issues: Option<String>,
    pub feature_requests: Option<String>,
    pub ui_ux_feedback: Option<String>,
    pub other_feedback: Option<String>,
}

impl Review {
    /// Rating clamped to the displayable [1,5] range.
    ///
    /// Both the star renderer and the aggregator use this, so an out-of-range
    /// stored value (e.g. 7) counts as 5 everywhere.
    pub fn clamped_rating(&self) -> u8 {
        self.rating.clamp(MIN_RATING, MAX_RATING) as u8
    }

    pub fn recommends(&self) -> bool {
        self.would_recommend.unwrap_or(false)
    }
}

/// Insert payload: exactly the columns the remote schema expects.
///
/// Produced only by `submit::ReviewDraft::validate`, which trims text,
/// clamps the rating, and turns empty optional fields into `None` so they
/// are stored as explicit `null`, never as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub name: String,
    pub role: Role,
    pub rating: u8,
    pub experience: String,
    pub reliability_rating: u8,
    pub would_recommend: bool,
    pub security_issues: Option<String>,
    pub bugs_glitches: Option<String>,
    pub database_issues: Option<String>,
    pub feature_requests: Option<String>,
    pub ui_ux_feedback: Option<String>,
    pub other_feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_with_rating(rating: i32) -> Review {
        Review {
            id: "r1".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            name: "Asha".to_string(),
            role: Role::Student,
            rating,
            experience: None,
            reliability_rating: None,
            would_recommend: None,
            security_issues: None,
            bugs_glitches: None,
            database_issues: None,
            feature_requests: None,
            ui_ux_feedback: None,
            other_feedback: None,
        }
    }

    #[test]
    fn clamps_out_of_range_ratings_for_display() {
        assert_eq!(review_with_rating(7).clamped_rating(), 5);
        assert_eq!(review_with_rating(0).clamped_rating(), 1);
        assert_eq!(review_with_rating(-3).clamped_rating(), 1);
        assert_eq!(review_with_rating(4).clamped_rating(), 4);
    }

    #[test]
    fn role_round_trips_as_lowercase() {
        let json = serde_json::to_string(&Role::Faculty).unwrap();
        assert_eq!(json, "\"faculty\"");
        let back: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(back, Role::Student);
    }

    #[test]
    fn wire_record_with_nulls_deserializes() {
        let json = r#"{
            "id": "a1", "created_at": "2026-02-03T10:00:00Z",
            "name": "Mei", "role": "faculty", "rating": 5,
            "experience": "Solid tool", "reliability_rating": 4,
            "would_recommend": true, "security_issues": null,
            "bugs_glitches": null, "database_issues": null,
            "feature_requests": "dark mode", "ui_ux_feedback": null,
            "other_feedback": null
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.role, Role::Faculty);
        assert!(review.recommends());
        assert_eq!(review.security_issues, None);
    }
}
