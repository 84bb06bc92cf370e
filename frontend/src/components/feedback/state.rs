//! State container for the feedback page.
//!
//! One instance owns the in-memory review feed exclusively; the only code
//! paths that touch it are the loader's page merges and the insert merge
//! (realtime or optimistic), both routed through `update.rs`.
//!
//! Fields are `pub` because they are accessed by the `view` and `update`
//! modules.

use std::cell::Cell;
use std::rc::Rc;

use common::feed::{FeedView, ReviewFeed};
use common::stats::Distribution;
use common::submit::{ReviewDraft, ValidationError};

use crate::supabase::Supabase;

pub struct FeedbackPage {
    /// Remote service handle. `None` means the build carried no service
    /// configuration: the page runs with a persistent "not connected"
    /// banner and skips every remote operation.
    pub client: Option<Supabase>,

    /// Every review observed so far, newest first.
    pub feed: ReviewFeed,

    /// Dashboard numbers, recomputed whenever `feed` changes.
    pub distribution: Distribution,

    /// Role/rating filters and the reveal count for the list.
    pub display: FeedView,

    /// Contents of the (multi-step) feedback form.
    pub draft: ReviewDraft,

    /// Current form step, `0..FORM_STEPS`.
    pub step: usize,

    /// Field-level validation message for the current step, if any.
    pub form_error: Option<ValidationError>,

    /// True while an insert is in flight; the form is inert meanwhile so a
    /// double-click cannot submit twice.
    pub submitting: bool,

    /// Remote insert failure, shown verbatim; the draft stays editable.
    pub submit_error: Option<String>,

    /// True until the paged load finishes or fails.
    pub loading: bool,

    /// Page-fetch failure. Pages loaded before the failure stay visible.
    pub load_error: Option<String>,

    /// True while the confetti overlay is up.
    pub celebrating: bool,

    /// Guard so the first-render kickoff runs once.
    pub loaded: bool,

    /// Shared teardown flag observed by the pager loop and the realtime
    /// task. Set in `destroy`.
    pub cancelled: Rc<Cell<bool>>,
}

impl FeedbackPage {
    pub fn new(client: Option<Supabase>) -> Self {
        let connected = client.is_some();
        Self {
            client,
            feed: ReviewFeed::new(),
            distribution: Distribution::default(),
            display: FeedView::new(),
            draft: ReviewDraft::default(),
            step: 0,
            form_error: None,
            submitting: false,
            submit_error: None,
            loading: connected,
            load_error: None,
            celebrating: false,
            loaded: false,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }
}
