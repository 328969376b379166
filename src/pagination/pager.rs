//! Lazy adapters that flatten a paginated list operation into items
//!
//! [`Pager`] drives an async operation and [`PageIter`] a blocking one.
//! Both fetch a page only when the consumer asks for an item past the
//! current buffer, yield at most one error and then stop.

use super::types::{Page, Paginated, PagerPhase, PagerState};
use futures::stream::{self, Stream};
use std::fmt;
use std::future::Future;

// ============================================================================
// List Operations
// ============================================================================

/// An async list operation: options in, one page out
///
/// Implemented for every `FnMut(O) -> impl Future<Output = Result<Page<T>, E>>`.
pub trait ListFn<O> {
    /// Item type of each page
    type Item;
    /// Error returned by a failed fetch
    type Error;
    /// Future resolving to one page
    type Future: Future<Output = Result<Page<Self::Item>, Self::Error>>;

    /// Request the page described by `opts`
    fn call(&mut self, opts: O) -> Self::Future;
}

impl<O, T, E, F, Fut> ListFn<O> for F
where
    F: FnMut(O) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    type Item = T;
    type Error = E;
    type Future = Fut;

    fn call(&mut self, opts: O) -> Self::Future {
        self(opts)
    }
}

// ============================================================================
// Async Pager
// ============================================================================

/// Async adapter over a paginated list operation
///
/// Each pager is one independent traversal starting from the options it was
/// built with. Obtain a fresh pager to start over.
pub struct Pager<O, F: ListFn<O>> {
    state: PagerState<O, F::Item>,
    fetch: F,
}

impl<O, F> Pager<O, F>
where
    O: Paginated,
    F: ListFn<O>,
{
    /// Start a traversal from an owned options value
    pub fn new(opts: O, fetch: F) -> Self {
        Self {
            state: PagerState::new(opts),
            fetch,
        }
    }

    /// Start a traversal from a borrowed options value
    ///
    /// The options are cloned up front so the caller's value is never
    /// written; `None` starts from the defaults.
    pub fn from_ref(opts: Option<&O>, fetch: F) -> Self
    where
        O: Default,
    {
        Self::new(opts.cloned().unwrap_or_default(), fetch)
    }

    /// Yield the next item, fetching a page if the current one is drained
    ///
    /// Returns `None` once the listing is exhausted or after an error was
    /// yielded.
    pub async fn next(&mut self) -> Option<Result<F::Item, F::Error>> {
        loop {
            if let Some(item) = self.state.pop() {
                return Some(Ok(item));
            }
            if !self.state.needs_fetch() {
                tracing::trace!(pages = self.state.pages_fetched(), "listing exhausted");
                return None;
            }
            match self.fetch.call(self.state.snapshot()).await {
                Ok(page) => self.state.absorb(page),
                Err(err) => {
                    self.state.fail();
                    return Some(Err(err));
                }
            }
        }
    }

    /// Feed items to `f` until it returns `false` or the listing ends
    ///
    /// Returning `false` stops before any further page is requested.
    pub async fn for_each_while<C>(mut self, mut f: C)
    where
        C: FnMut(Result<F::Item, F::Error>) -> bool,
    {
        while let Some(item) = self.next().await {
            if !f(item) {
                break;
            }
        }
    }

    /// Collect every item, stopping at the first error
    pub async fn try_collect(mut self) -> Result<Vec<F::Item>, F::Error> {
        let mut all = Vec::new();
        while let Some(item) = self.next().await {
            all.push(item?);
        }
        Ok(all)
    }

    /// Turn the pager into a [`Stream`]
    ///
    /// Dropping the stream ends the traversal without further requests.
    pub fn into_stream(self) -> impl Stream<Item = Result<F::Item, F::Error>> {
        stream::unfold(self, |mut pager| async move {
            let item = pager.next().await?;
            Some((item, pager))
        })
    }

    /// Options that the next request will use
    pub fn options(&self) -> &O {
        self.state.options()
    }

    /// Number of pages fetched successfully so far
    pub fn pages_fetched(&self) -> usize {
        self.state.pages_fetched()
    }

    /// Current phase of the traversal
    pub fn phase(&self) -> PagerPhase {
        self.state.phase()
    }

    /// Check if the pager will yield nothing more
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }
}

impl<O: fmt::Debug, F: ListFn<O>> fmt::Debug for Pager<O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("options", self.state.options())
            .field("phase", &self.state.phase())
            .field("pages_fetched", &self.state.pages_fetched())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Blocking Iterator
// ============================================================================

/// Blocking adapter implementing [`Iterator`]
///
/// `for` loops with `break`, `take` and friends all stop without fetching
/// pages that are not needed.
pub struct PageIter<O, T, F> {
    state: PagerState<O, T>,
    fetch: F,
}

impl<O, T, E, F> PageIter<O, T, F>
where
    O: Paginated,
    F: FnMut(O) -> Result<Page<T>, E>,
{
    /// Start a traversal from an owned options value
    pub fn new(opts: O, fetch: F) -> Self {
        Self {
            state: PagerState::new(opts),
            fetch,
        }
    }

    /// Start a traversal from a borrowed options value (cloned up front)
    pub fn from_ref(opts: Option<&O>, fetch: F) -> Self
    where
        O: Default,
    {
        Self::new(opts.cloned().unwrap_or_default(), fetch)
    }

    /// Number of pages fetched successfully so far
    pub fn pages_fetched(&self) -> usize {
        self.state.pages_fetched()
    }

    /// Check if the iterator will yield nothing more
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }
}

impl<O, T, E, F> Iterator for PageIter<O, T, F>
where
    O: Paginated,
    F: FnMut(O) -> Result<Page<T>, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.state.pop() {
                return Some(Ok(item));
            }
            if !self.state.needs_fetch() {
                return None;
            }
            match (self.fetch)(self.state.snapshot()) {
                Ok(page) => self.state.absorb(page),
                Err(err) => {
                    self.state.fail();
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<O, T, E, F> std::iter::FusedIterator for PageIter<O, T, F>
where
    O: Paginated,
    F: FnMut(O) -> Result<Page<T>, E>,
{
}

impl<O: fmt::Debug, T, F> fmt::Debug for PageIter<O, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIter")
            .field("options", self.state.options())
            .field("phase", &self.state.phase())
            .field("pages_fetched", &self.state.pages_fetched())
            .finish_non_exhaustive()
    }
}
