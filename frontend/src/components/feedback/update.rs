//! Update function for the feedback page.
//!
//! Elm-style: receives the current state, the `Context`, and a `Msg`,
//! mutates the state, and returns whether the view should re-render.
//!
//! Key behaviors
//! - Merging loaded pages and realtime inserts into the feed (dedup by id)
//!   and recomputing the dashboard distribution on every change.
//! - A page-fetch failure keeps whatever already loaded and shows a
//!   persistent notice; there is no automatic retry.
//! - Step navigation validates only the fields on the current step.
//! - `Submit` validates the whole draft before any network call, disables
//!   the form while the insert is in flight, optimistically merges the
//!   stored row on success, and leaves the draft untouched on failure so the
//!   user can correct and retry.

use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::stats::distribution;
use common::submit::{FORM_STEPS, ReviewDraft, deserves_celebration};

use super::helpers::show_toast;
use super::messages::Msg;
use super::state::FeedbackPage;

/// How long the confetti overlay stays up.
const CELEBRATION_MS: u32 = 3_500;

pub fn update(page: &mut FeedbackPage, ctx: &Context<FeedbackPage>, msg: Msg) -> bool {
    match msg {
        Msg::PageLoaded(batch) => {
            page.feed.extend_page(batch);
            page.distribution = distribution(page.feed.reviews());
            true
        }
        Msg::LoadFinished => {
            page.loading = false;
            true
        }
        Msg::LoadFailed(message) => {
            page.loading = false;
            page.load_error = Some(message);
            true
        }
        Msg::RealtimeInsert(review) => {
            // False means this was the echo of a record already merged.
            if page.feed.merge_newest(review) {
                page.distribution = distribution(page.feed.reviews());
                true
            } else {
                false
            }
        }

        Msg::NameInput(value) => {
            page.draft.name = value;
            true
        }
        Msg::RoleSelected(role) => {
            page.draft.role = Some(role);
            true
        }
        Msg::RatingSelected(stars) => {
            page.draft.rating = stars;
            true
        }
        Msg::ExperienceInput(value) => {
            page.draft.experience = value;
            true
        }
        Msg::ReliabilitySelected(stars) => {
            page.draft.reliability_rating = stars;
            true
        }
        Msg::RecommendSelected(answer) => {
            page.draft.would_recommend = Some(answer);
            true
        }
        Msg::CategoryInput(field, value) => {
            page.draft.set_category(field, value);
            true
        }

        Msg::NextStep => {
            match page.draft.validate_step(page.step) {
                Ok(()) => {
                    if page.step + 1 < FORM_STEPS {
                        page.step += 1;
                    }
                    page.form_error = None;
                }
                Err(err) => page.form_error = Some(err),
            }
            true
        }
        Msg::PrevStep => {
            page.step = page.step.saturating_sub(1);
            page.form_error = None;
            true
        }

        Msg::Submit => {
            if page.submitting {
                return false;
            }
            match page.draft.validate() {
                Err(err) => {
                    page.form_error = Some(err);
                    true
                }
                Ok(payload) => {
                    // Unreachable through the UI: the submit button is not
                    // rendered without a connection.
                    let Some(client) = page.client.clone() else {
                        return false;
                    };
                    page.submitting = true;
                    page.submit_error = None;
                    page.form_error = None;

                    let link = ctx.link().clone();
                    spawn_local(async move {
                        match client.insert_review(&payload).await {
                            Ok(stored) => link.send_message(Msg::Submitted(stored)),
                            Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
                        }
                    });
                    true
                }
            }
        }
        Msg::Submitted(stored) => {
            page.submitting = false;
            let rating = stored.clamped_rating();
            page.feed.merge_newest(stored);
            page.distribution = distribution(page.feed.reviews());

            page.draft = ReviewDraft::default();
            page.step = 0;
            show_toast("Thanks — your feedback is in!");

            if deserves_celebration(rating) {
                page.celebrating = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    TimeoutFuture::new(CELEBRATION_MS).await;
                    link.send_message(Msg::CelebrationDone);
                });
            }
            true
        }
        Msg::SubmitFailed(message) => {
            page.submitting = false;
            page.submit_error = Some(message);
            true
        }
        Msg::CelebrationDone => {
            page.celebrating = false;
            true
        }

        Msg::SetRoleFilter(filter) => {
            page.display.set_role(filter);
            true
        }
        Msg::SetRatingFilter(filter) => {
            page.display.set_rating(filter);
            true
        }
        Msg::RevealMore => {
            page.display.reveal_more();
            true
        }
    }
}
