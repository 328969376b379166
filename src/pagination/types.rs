//! Pagination types and traits
//!
//! Defines page metadata, the option capability traits and the policies
//! that write a page's continuation into an options snapshot.

use std::collections::VecDeque;

// ============================================================================
// Page Metadata
// ============================================================================

/// Pagination metadata returned alongside one page of items
///
/// Produced fresh for every response and consumed immediately by the pager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Page number of the next page (`0` or `None` means there is none)
    pub next_page: Option<u32>,
    /// Opaque token for the next page (empty or `None` means there is none)
    pub next_cursor: Option<String>,
    /// Page number of the previous page
    pub prev_page: Option<u32>,
    /// Page number of the first page
    pub first_page: Option<u32>,
    /// Page number of the last page
    pub last_page: Option<u32>,
}

impl PageMeta {
    /// Metadata for the final page
    pub fn last() -> Self {
        Self::default()
    }

    /// Metadata pointing at a next page number
    pub fn with_next_page(page: u32) -> Self {
        Self {
            next_page: Some(page),
            ..Self::default()
        }
    }

    /// Metadata pointing at a next cursor
    pub fn with_next_cursor(cursor: impl Into<String>) -> Self {
        Self {
            next_cursor: Some(cursor.into()),
            ..Self::default()
        }
    }

    /// The next page number, if one follows
    pub fn next_page(&self) -> Option<u32> {
        self.next_page.filter(|page| *page != 0)
    }

    /// The next cursor, if one follows
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }

    /// True when neither a next page nor a next cursor is signalled
    pub fn is_last(&self) -> bool {
        self.next_page().is_none() && self.next_cursor().is_none()
    }
}

/// One page of items plus its pagination metadata
///
/// Every wrapped list operation returns this shape, even when the remote
/// API nests its items inside a wrapper object.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in the order the server returned them
    pub items: Vec<T>,
    /// Continuation for the next request
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    /// Create a terminal page
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, PageMeta::last())
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Options that select a page by number (`?page=N`)
pub trait HasPageNumber {
    /// Current page number (`0` means "server default")
    fn page(&self) -> u32;

    /// Replace the page number
    fn set_page(&mut self, page: u32);
}

/// Options that select a page by opaque cursor
pub trait HasPageCursor {
    /// Current cursor, if set
    fn cursor(&self) -> Option<&str>;

    /// Replace the cursor
    fn set_cursor(&mut self, cursor: String);

    /// Drop the cursor so the next request is not selected by it
    fn clear_cursor(&mut self);
}

/// Options snapshot that knows how to continue a listing
///
/// Implement through [`impl_paginated!`](crate::impl_paginated), which only
/// accepts policies the type's capabilities support.
pub trait Paginated: Clone {
    /// Write the continuation from `meta` into `self`.
    ///
    /// Returns `false` when the listing is exhausted.
    fn advance(&mut self, meta: &PageMeta) -> bool;
}

/// Single-page operations
impl Paginated for () {
    fn advance(&mut self, _meta: &PageMeta) -> bool {
        false
    }
}

/// Continue by page number, using the server's value verbatim
pub fn advance_by_page<O: HasPageNumber + ?Sized>(opts: &mut O, meta: &PageMeta) -> bool {
    match meta.next_page() {
        Some(page) => {
            opts.set_page(page);
            true
        }
        None => false,
    }
}

/// Continue by cursor
///
/// A next page number alone cannot be expressed by a cursor-only type and
/// ends the listing.
pub fn advance_by_cursor<O: HasPageCursor + ?Sized>(opts: &mut O, meta: &PageMeta) -> bool {
    match meta.next_cursor() {
        Some(cursor) => {
            opts.set_cursor(cursor.to_string());
            true
        }
        None => false,
    }
}

/// Continue by whichever of cursor and page number the server populated
///
/// A field the metadata leaves unset is cleared, since a stale cursor takes
/// precedence over a fresh page number on the server. The listing ends only
/// when both are exhausted, and then `opts` is left untouched.
pub fn advance_by_page_or_cursor<O>(opts: &mut O, meta: &PageMeta) -> bool
where
    O: HasPageNumber + HasPageCursor + ?Sized,
{
    if meta.is_last() {
        return false;
    }

    match meta.next_cursor() {
        Some(cursor) => opts.set_cursor(cursor.to_string()),
        None => opts.clear_cursor(),
    }
    opts.set_page(meta.next_page().unwrap_or(0));
    true
}

/// Implement [`Paginated`] for an options type with a chosen policy
///
/// ```rust,ignore
/// impl_paginated!(RepoListByOrgOptions => page);
/// impl_paginated!(ListCursorOptions => cursor);
/// impl_paginated!(AlertListOptions => page, cursor);
/// impl_paginated!(Unpaged => none);
/// ```
#[macro_export]
macro_rules! impl_paginated {
    ($ty:ty => page) => {
        impl $crate::pagination::Paginated for $ty {
            fn advance(&mut self, meta: &$crate::pagination::PageMeta) -> bool {
                $crate::pagination::advance_by_page(self, meta)
            }
        }
    };
    ($ty:ty => cursor) => {
        impl $crate::pagination::Paginated for $ty {
            fn advance(&mut self, meta: &$crate::pagination::PageMeta) -> bool {
                $crate::pagination::advance_by_cursor(self, meta)
            }
        }
    };
    ($ty:ty => page, cursor) => {
        impl $crate::pagination::Paginated for $ty {
            fn advance(&mut self, meta: &$crate::pagination::PageMeta) -> bool {
                $crate::pagination::advance_by_page_or_cursor(self, meta)
            }
        }
    };
    ($ty:ty => none) => {
        impl $crate::pagination::Paginated for $ty {
            fn advance(&mut self, _meta: &$crate::pagination::PageMeta) -> bool {
                false
            }
        }
    };
}

// ============================================================================
// Pager State
// ============================================================================

/// Lifecycle of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    /// A page request is outstanding or about to be issued
    Fetching,
    /// Exhausted or failed; terminal
    Done,
}

/// Traversal state shared by the async and blocking adapters
///
/// Holds the options snapshot, the unconsumed items of the current page
/// and the phase. Items are handed out before the next fetch is allowed.
#[derive(Debug, Clone)]
pub struct PagerState<O, T> {
    opts: O,
    buffer: VecDeque<T>,
    phase: PagerPhase,
    pages_fetched: usize,
}

impl<O, T> PagerState<O, T> {
    /// Start a traversal from an owned snapshot
    pub fn new(opts: O) -> Self {
        Self {
            opts,
            buffer: VecDeque::new(),
            phase: PagerPhase::Fetching,
            pages_fetched: 0,
        }
    }

    /// Take the next buffered item
    pub fn pop(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    /// True when the buffer is drained and another page must be requested
    pub fn needs_fetch(&self) -> bool {
        self.buffer.is_empty() && self.phase == PagerPhase::Fetching
    }

    /// Options as they will be sent on the next request
    pub fn options(&self) -> &O {
        &self.opts
    }

    /// Record a failed fetch; the traversal ends
    pub fn fail(&mut self) {
        tracing::debug!(page = self.pages_fetched + 1, "page fetch failed");
        self.buffer.clear();
        self.phase = PagerPhase::Done;
    }

    /// Current phase
    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    /// Check if nothing more will be yielded
    pub fn is_done(&self) -> bool {
        self.phase == PagerPhase::Done && self.buffer.is_empty()
    }

    /// Number of pages requested successfully so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<O: Paginated, T> PagerState<O, T> {
    /// Copy of the options for the next request
    pub fn snapshot(&self) -> O {
        self.opts.clone()
    }

    /// Store a fetched page and advance the snapshot
    pub fn absorb(&mut self, page: Page<T>) {
        self.pages_fetched += 1;
        let more = self.opts.advance(&page.meta);

        tracing::debug!(
            page = self.pages_fetched,
            items = page.items.len(),
            more,
            "fetched page"
        );

        self.buffer.extend(page.items);
        if !more {
            self.phase = PagerPhase::Done;
        }
    }
}
