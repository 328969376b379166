//! Query options for the list endpoints
//!
//! Every options type serializes into query parameters through
//! [`RequestConfig::with_query_struct`](crate::http::RequestConfig::with_query_struct)
//! and declares how a listing continues via [`impl_paginated!`](crate::impl_paginated).

use crate::impl_paginated;
use crate::pagination::{HasPageCursor, HasPageNumber};
use chrono::{DateTime, Utc};
use serde::Serialize;

fn is_zero(value: &u32) -> bool {
    *value == 0
}

// ============================================================================
// Shared Options
// ============================================================================

/// Page-number selection shared by most list endpoints
///
/// Zero means "let the server decide" and is not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    /// Page to fetch (1-based)
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Items per page (server default 30, max 100)
    #[serde(skip_serializing_if = "is_zero")]
    pub per_page: u32,
}

impl ListOptions {
    /// Options starting at `page`
    pub fn page(page: u32) -> Self {
        Self { page, per_page: 0 }
    }

    /// Set the page size
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}

impl HasPageNumber for ListOptions {
    fn page(&self) -> u32 {
        self.page
    }

    fn set_page(&mut self, page: u32) {
        self.page = page;
    }
}

impl_paginated!(ListOptions => page);

/// Cursor selection for endpoints that only page by cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListCursorOptions {
    /// Opaque cursor from a previous response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Items per page
    #[serde(skip_serializing_if = "is_zero")]
    pub per_page: u32,
}

impl HasPageCursor for ListCursorOptions {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    fn clear_cursor(&mut self) {
        self.cursor = None;
    }
}

impl_paginated!(ListCursorOptions => cursor);

/// Implements [`HasPageNumber`] by delegating to an embedded [`ListOptions`]
macro_rules! delegate_page_number {
    ($ty:ty) => {
        impl HasPageNumber for $ty {
            fn page(&self) -> u32 {
                self.list.page
            }

            fn set_page(&mut self, page: u32) {
                self.list.page = page;
            }
        }
    };
}

// ============================================================================
// Repositories
// ============================================================================

/// Options for listing an organization's repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoListByOrgOptions {
    /// `all`, `public`, `private`, `forks`, `sources` or `member`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// `created`, `updated`, `pushed` or `full_name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

delegate_page_number!(RepoListByOrgOptions);
impl_paginated!(RepoListByOrgOptions => page);

/// Options for listing a user's public repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoListForUserOptions {
    /// `all`, `owner` or `member`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

delegate_page_number!(RepoListForUserOptions);
impl_paginated!(RepoListForUserOptions => page);

// ============================================================================
// Issues
// ============================================================================

/// Options for listing a repository's issues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueListByRepoOptions {
    /// `open`, `closed` or `all`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Only issues carrying every one of these labels
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Login, `none` or `*`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// `created`, `updated` or `comments`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Only issues updated at or after this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub list: ListOptions,
}

delegate_page_number!(IssueListByRepoOptions);
impl_paginated!(IssueListByRepoOptions => page);

// ============================================================================
// Actions
// ============================================================================

/// Options for listing a repository's workflow runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListWorkflowRunsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Triggering event, e.g. `push` or `pull_request`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Run status or conclusion, e.g. `completed` or `failure`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

delegate_page_number!(ListWorkflowRunsOptions);
impl_paginated!(ListWorkflowRunsOptions => page);

// ============================================================================
// Code Scanning
// ============================================================================

/// Options for listing code scanning alerts
///
/// The endpoint answers with page numbers or an `after` cursor depending on
/// how it was called, so both are tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertListOptions {
    /// `open`, `closed`, `dismissed` or `fixed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Git reference the alerts were found on
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(rename = "after", skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(flatten)]
    pub list: ListOptions,
}

delegate_page_number!(AlertListOptions);

impl HasPageCursor for AlertListOptions {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    fn clear_cursor(&mut self) {
        self.cursor = None;
    }
}

impl_paginated!(AlertListOptions => page, cursor);
