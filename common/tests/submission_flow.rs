//! End-to-end model flow: draft → payload → stored row → feed → dashboard.

use common::feed::ReviewFeed;
use common::model::review::{Review, Role};
use common::stats::distribution;
use common::submit::ReviewDraft;

/// What the service would return for the submitted payload: the same fields
/// plus a server-assigned id and timestamp.
fn stored_row(id: &str, payload: &common::model::review::NewReview) -> Review {
    Review {
        id: id.to_string(),
        created_at: "2026-03-04T12:00:00Z".to_string(),
        name: payload.name.clone(),
        role: payload.role,
        rating: i32::from(payload.rating),
        experience: Some(payload.experience.clone()),
        reliability_rating: Some(i32::from(payload.reliability_rating)),
        would_recommend: Some(payload.would_recommend),
        security_issues: payload.security_issues.clone(),
        bugs_glitches: payload.bugs_glitches.clone(),
        database_issues: payload.database_issues.clone(),
        feature_requests: payload.feature_requests.clone(),
        ui_ux_feedback: payload.ui_ux_feedback.clone(),
        other_feedback: payload.other_feedback.clone(),
    }
}

#[test]
fn single_submission_round_trip_updates_feed_and_dashboard() {
    let draft = ReviewDraft {
        name: "Asha".to_string(),
        role: Some(Role::Student),
        rating: 4,
        experience: "Good for weekly revision sessions.".to_string(),
        reliability_rating: 4,
        would_recommend: Some(true),
        ..ReviewDraft::default()
    };

    let payload = draft.validate().expect("draft is complete");
    let row = stored_row("r1", &payload);

    let mut feed = ReviewFeed::new();
    assert!(feed.merge_newest(row.clone()));
    assert_eq!(feed.len(), 1);

    let dist = distribution(feed.reviews());
    assert_eq!(dist.total, 1);
    assert_eq!(dist.average, 4.0);
    assert_eq!(dist.histogram, [0, 0, 0, 1, 0]);
    assert_eq!(dist.recommend_count, 1);

    // The realtime echo of the same insert is a no-op.
    assert!(!feed.merge_newest(row));
    assert_eq!(feed.len(), 1);
    assert_eq!(distribution(feed.reviews()).total, 1);
}
