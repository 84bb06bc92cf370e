//! Range bookkeeping for the initial paged load.
//!
//! The loader keeps requesting fixed-size pages until one comes back short.
//! That termination rule needs no total-count query and stays correct when
//! the remote collection grows mid-load (at worst one extra, nearly empty
//! page is fetched).

/// Rows requested per page during the initial load.
pub const PAGE_SIZE: usize = 500;

/// Tracks how far the paged load has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    offset: usize,
    page_size: usize,
    done: bool,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size,
            done: false,
        }
    }

    /// Inclusive row range for the next request (the service's `Range`
    /// header convention), or `None` once a short page ended the load.
    pub fn next_range(&self) -> Option<(usize, usize)> {
        if self.done {
            return None;
        }
        Some((self.offset, self.offset + self.page_size - 1))
    }

    /// Records how many rows the last page actually returned. A short page
    /// signals the end of the remote collection.
    pub fn record(&mut self, fetched: usize) {
        self.offset += fetched;
        if fetched < self.page_size {
            self.done = true;
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
