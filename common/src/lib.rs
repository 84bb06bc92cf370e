//! Shared domain logic for the feedback site.
//!
//! Everything here is pure and target-independent: the wire model for review
//! records, the in-memory feed with its merge/dedup rule, the derived rating
//! distribution, the paged-load bookkeeping, and form validation. The wasm
//! frontend drives these; the unit tests exercise them natively.

pub mod feed;
pub mod model;
pub mod pager;
pub mod stats;
pub mod submit;
