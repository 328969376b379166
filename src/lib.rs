// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ghlist
//!
//! A typed client for GitHub's REST list endpoints where every listing is
//! also available as a lazy sequence of items.
//!
//! ## Features
//!
//! - **Pagination Adapter**: Turn any "options in, page out" operation into a
//!   stream or iterator of items, fetching pages only on demand
//! - **Link Header Parsing**: Page numbers and cursors from `Link` headers
//! - **Resilient Transport**: Retries with backoff, client-side throttling and
//!   server quota tracking
//! - **Typed Endpoints**: Repositories, issues, workflow runs, webhook
//!   deliveries and code scanning alerts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use ghlist::{ClientConfig, GitHubClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = GitHubClient::new(ClientConfig::from_env())?;
//!
//!     // First ten repositories; the second page is never requested
//!     let repos: Vec<_> = client
//!         .repos()
//!         .list_by_org_iter("rust-lang", None)
//!         .into_stream()
//!         .take(10)
//!         .collect()
//!         .await;
//!
//!     for repo in repos {
//!         println!("{}", repo?.full_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  GitHubClient: repos() issues() actions() code_scanning()     │
//! │  list_x(opts) -> Page<T>        list_x_iter(opts) -> Pager     │
//! └──────────────────────────────────────────────────────────────┘
//!                 │                               │
//! ┌───────────────┴───────────┐   ┌───────────────┴──────────────┐
//! │           HTTP            │   │          Pagination          │
//! ├───────────────────────────┤   ├──────────────────────────────┤
//! │ Auth, Retry, Backoff      │   │ PageMeta from Link header    │
//! │ Throttle, Quota tracking  │   │ Pager (async), PageIter      │
//! └───────────────────────────┘   └──────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod http;
pub mod pagination;
pub mod types;

// Re-export main types
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use pagination::{Page, PageIter, PageMeta, Pager, Paginated};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
