//! Pagination module
//!
//! Turns a list operation that returns one page at a time into a lazy
//! sequence of items.
//!
//! # Overview
//!
//! A list operation takes an options value and returns a [`Page`]: the
//! items plus [`PageMeta`] describing the next page, by number, by cursor
//! or both. Options types declare what they support through
//! [`HasPageNumber`] and [`HasPageCursor`] and pick a continuation policy
//! with [`impl_paginated!`](crate::impl_paginated).
//!
//! [`Pager`] (async) and [`PageIter`] (blocking) wrap such an operation.
//! They work on their own copy of the options, fetch a page only when the
//! consumer needs another item, yield at most one error and never retry.

mod link;
mod pager;
mod types;

pub use pager::{ListFn, PageIter, Pager};
pub use types::{
    advance_by_cursor, advance_by_page, advance_by_page_or_cursor, HasPageCursor, HasPageNumber,
    Page, PageMeta, Paginated, PagerPhase, PagerState,
};
