//! GitHub REST client
//!
//! [`GitHubClient`] owns the transport; endpoint handlers borrow it:
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use ghlist::{ClientConfig, GitHubClient};
//!
//! let client = GitHubClient::new(ClientConfig::from_env())?;
//!
//! // One page
//! let page = client.repos().list_by_org("rust-lang", None).await?;
//!
//! // Every repository, fetched lazily
//! let mut repos = client.repos().list_by_org_iter("rust-lang", None).into_stream().boxed_local();
//! while let Some(repo) = repos.next().await {
//!     println!("{}", repo?.full_name);
//! }
//! ```

mod actions;
mod code_scanning;
mod issues;
mod models;
mod options;
mod repos;

pub use actions::ActionsHandler;
pub use code_scanning::CodeScanningHandler;
pub use issues::IssuesHandler;
pub use models::{
    AlertRule, AlertTool, CodeScanningAlert, HookDelivery, Issue, Label, RateLimitResponse,
    Repository, User, WorkflowRun, WorkflowRuns,
};
pub use options::{
    AlertListOptions, IssueListByRepoOptions, ListCursorOptions, ListOptions,
    ListWorkflowRunsOptions, RepoListByOrgOptions, RepoListForUserOptions,
};
pub use repos::RepositoriesHandler;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, Rate, RateCategory, RequestConfig};
use crate::pagination::PageMeta;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Public API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested on every call
pub const MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned on every call
pub const API_VERSION: &str = "2022-11-28";

/// Client for the GitHub REST API
#[derive(Debug)]
pub struct GitHubClient {
    http: HttpClient,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.to_http_config())?;
        Self::from_http(http)
    }

    /// Wrap an existing HTTP client
    ///
    /// Its base URL is used as the API root, `https://api.github.com` when
    /// unset. The GitHub default headers are expected to be configured on it.
    pub fn from_http(http: HttpClient) -> Result<Self> {
        let base = http
            .config()
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&base)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_config("api_url", format!("{base} cannot be a base URL")));
        }

        Ok(Self { http, base_url })
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// API root all paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Repository endpoints
    pub fn repos(&self) -> RepositoriesHandler<'_> {
        RepositoriesHandler::new(self)
    }

    /// Issue endpoints
    pub fn issues(&self) -> IssuesHandler<'_> {
        IssuesHandler::new(self)
    }

    /// GitHub Actions endpoints
    pub fn actions(&self) -> ActionsHandler<'_> {
        ActionsHandler::new(self)
    }

    /// Code scanning endpoints
    pub fn code_scanning(&self) -> CodeScanningHandler<'_> {
        CodeScanningHandler::new(self)
    }

    /// Fetch the caller's quota from `GET /rate_limit`
    ///
    /// The answer also refreshes the tracker behind [`rate_limits`](Self::rate_limits).
    /// This endpoint does not count against the quota, so it is sent even
    /// when the tracker says a category is exhausted.
    pub async fn rate_limit(&self) -> Result<RateLimitResponse> {
        let url = self.endpoint(&["rate_limit"])?;
        let body: RateLimitResponse = self
            .http
            .request_json(Method::GET, &url, RequestConfig::new().unmetered())
            .await?;

        for (name, rate) in &body.resources {
            if let Some(category) = RateCategory::from_resource(name) {
                self.http.rate_limits().set(category, *rate);
            }
        }
        Ok(body)
    }

    /// Quota observed on responses so far
    pub fn rate_limits(&self) -> HashMap<RateCategory, Rate> {
        self.http.rate_limits().snapshot()
    }

    /// Absolute URL of an endpoint, each segment percent-encoded
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_config("api_url", "cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    /// GET one page of a list endpoint
    ///
    /// Returns the decoded body and the pagination metadata of the `Link`
    /// header.
    pub(crate) async fn get_page<B, O>(&self, url: &str, opts: &O) -> Result<(B, PageMeta)>
    where
        B: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        let config = RequestConfig::new().with_query_struct(opts)?;
        let response = self.http.get_with_config(url, config).await?;
        let meta = PageMeta::from_headers(response.headers());
        let body: B = response.json().await?;

        debug!(
            url,
            next_page = ?meta.next_page(),
            next_cursor = ?meta.next_cursor(),
            "listed page"
        );
        Ok((body, meta))
    }
}

/// Reject empty path arguments before any request goes out
pub(crate) fn require<'s>(name: &str, value: &'s str) -> Result<&'s str> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests;
