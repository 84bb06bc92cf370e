//! In-memory review collection and the view filter/paginator over it.
//!
//! The feed is owned by a single page component. Only two code paths mutate
//! it — the loader appending pages and the merge of a freshly inserted record
//! (realtime event or the submitter's own optimistic copy) — and both follow
//! the same rule: skip any record whose id is already present. That rule is
//! the sole dedup mechanism against the paged-load/realtime race.

use crate::model::review::{Review, Role};

/// Records shown when a filter is first applied.
pub const INITIAL_REVEAL: usize = 12;
/// Records added per "load more" click.
pub const REVEAL_INCREMENT: usize = 12;

/// Newest-first collection of every review observed so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFeed {
    reviews: Vec<Review>,
}

impl ReviewFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Appends one page from the initial load, keeping arrival order and
    /// skipping ids already present (page-boundary duplicates, records that
    /// raced in over the realtime channel mid-load).
    pub fn extend_page(&mut self, page: Vec<Review>) {
        for review in page {
            if !self.contains_id(&review.id) {
                self.reviews.push(review);
            }
        }
    }

    /// Prepends a newly inserted record unless its id is already present.
    ///
    /// Returns whether the record was inserted; a `false` means this was a
    /// re-delivery (the realtime echo of an optimistic merge, or vice versa)
    /// and the feed is unchanged.
    pub fn merge_newest(&mut self, review: Review) -> bool {
        if self.contains_id(&review.id) {
            return false;
        }
        self.reviews.insert(0, review);
        true
    }

    fn contains_id(&self, id: &str) -> bool {
        self.reviews.iter().any(|r| r.id == id)
    }
}

/// Role criterion for the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

/// Exact-star criterion for the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    Any,
    Exactly(u8),
}

/// What the list currently shows: two filters plus a reveal count.
///
/// The reveal count is how many matching records are visible, independent of
/// how many have been loaded. Changing either filter resets it to
/// [`INITIAL_REVEAL`] so a long-scrolled state never carries over to a
/// freshly filtered (possibly tiny) result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedView {
    role: RoleFilter,
    rating: RatingFilter,
    revealed: usize,
}

impl Default for FeedView {
    fn default() -> Self {
        Self {
            role: RoleFilter::All,
            rating: RatingFilter::Any,
            revealed: INITIAL_REVEAL,
        }
    }
}

impl FeedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> RoleFilter {
        self.role
    }

    pub fn rating(&self) -> RatingFilter {
        self.rating
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn set_role(&mut self, filter: RoleFilter) {
        self.role = filter;
        self.revealed = INITIAL_REVEAL;
    }

    pub fn set_rating(&mut self, filter: RatingFilter) {
        self.rating = filter;
        self.revealed = INITIAL_REVEAL;
    }

    pub fn reveal_more(&mut self) {
        self.revealed += REVEAL_INCREMENT;
    }

    fn matches(&self, review: &Review) -> bool {
        let role_ok = match self.role {
            RoleFilter::All => true,
            RoleFilter::Only(role) => review.role == role,
        };
        let rating_ok = match self.rating {
            RatingFilter::Any => true,
            RatingFilter::Exactly(stars) => review.clamped_rating() == stars,
        };
        role_ok && rating_ok
    }

    /// Visible slice of the feed plus the total number of matching records.
    ///
    /// Order follows the feed (newest first, no re-sort); the feed itself is
    /// never touched. The total drives the "showing N of M" label and the
    /// load-more affordance.
    pub fn select<'a>(&self, feed: &'a ReviewFeed) -> (Vec<&'a Review>, usize) {
        let matching: Vec<&Review> = feed.reviews().iter().filter(|r| self.matches(r)).collect();
        let total = matching.len();
        let visible = matching.into_iter().take(self.revealed).collect();
        (visible, total)
    }
}
