//! Server-side rate limit bookkeeping
//!
//! GitHub reports the caller's remaining quota in `X-RateLimit-*` headers
//! on every response. The latest value per category is kept so requests
//! that are certain to be rejected fail locally instead.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

const HEADER_LIMIT: &str = "x-ratelimit-limit";
const HEADER_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_USED: &str = "x-ratelimit-used";
const HEADER_RESET: &str = "x-ratelimit-reset";
const HEADER_RESOURCE: &str = "x-ratelimit-resource";

/// Independent rate limit bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateCategory {
    Core,
    Search,
    CodeSearch,
    Graphql,
    Scim,
}

impl RateCategory {
    /// Name used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Search => "search",
            Self::CodeSearch => "code_search",
            Self::Graphql => "graphql",
            Self::Scim => "scim",
        }
    }

    /// Parse the value of `X-RateLimit-Resource`
    pub fn from_resource(resource: &str) -> Option<Self> {
        match resource {
            "core" => Some(Self::Core),
            "search" => Some(Self::Search),
            "code_search" => Some(Self::CodeSearch),
            "graphql" => Some(Self::Graphql),
            "scim" => Some(Self::Scim),
            _ => None,
        }
    }

    /// Category a request path is charged against
    pub fn for_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        let path = path.trim_start_matches('/');

        if path.starts_with("search/code") {
            Self::CodeSearch
        } else if path.starts_with("search/") {
            Self::Search
        } else if path.starts_with("graphql") {
            Self::Graphql
        } else if path.starts_with("scim/") {
            Self::Scim
        } else {
            Self::Core
        }
    }
}

impl fmt::Display for RateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quota of one category at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Requests allowed per window
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Requests made in the current window
    #[serde(default)]
    pub used: u32,
    /// When the window resets
    #[serde(with = "chrono::serde::ts_seconds")]
    pub reset: DateTime<Utc>,
}

impl Rate {
    /// Parse the `X-RateLimit-*` headers
    ///
    /// Returns the category named by the response, if any, and the rate.
    /// `None` when the limit, remaining or reset headers are missing.
    pub fn from_headers(headers: &HeaderMap) -> Option<(Option<RateCategory>, Self)> {
        let limit = header_number::<u32>(headers, HEADER_LIMIT)?;
        let remaining = header_number::<u32>(headers, HEADER_REMAINING)?;
        let reset = header_number::<i64>(headers, HEADER_RESET)?;
        let used = header_number(headers, HEADER_USED).unwrap_or(limit.saturating_sub(remaining));
        let category = headers
            .get(HEADER_RESOURCE)
            .and_then(|v| v.to_str().ok())
            .and_then(RateCategory::from_resource);

        let rate = Self {
            limit,
            remaining,
            used,
            reset: DateTime::from_timestamp(reset, 0)?,
        };
        Some((category, rate))
    }

    /// True when no request can succeed before `reset`
    pub fn is_exhausted_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining == 0 && self.reset > now
    }
}

fn header_number<N: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<N> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Latest known quota per category
///
/// Shared by every request of one client.
#[derive(Debug, Default)]
pub struct RateLimits {
    rates: Mutex<HashMap<RateCategory, Rate>>,
}

impl RateLimits {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the quota reported by a response
    ///
    /// The response's own `X-RateLimit-Resource` wins over `fallback`.
    pub fn update_from_headers(
        &self,
        headers: &HeaderMap,
        fallback: RateCategory,
    ) -> Option<Rate> {
        let (category, rate) = Rate::from_headers(headers)?;
        let category = category.unwrap_or(fallback);
        self.set(category, rate);

        tracing::trace!(
            %category,
            remaining = rate.remaining,
            limit = rate.limit,
            "rate limit updated"
        );
        Some(rate)
    }

    /// Replace the quota of one category
    pub fn set(&self, category: RateCategory, rate: Rate) {
        self.lock().insert(category, rate);
    }

    /// Latest quota of one category
    pub fn get(&self, category: RateCategory) -> Option<Rate> {
        self.lock().get(&category).copied()
    }

    /// Copy of every known quota
    pub fn snapshot(&self) -> HashMap<RateCategory, Rate> {
        self.lock().clone()
    }

    /// Fail if `category` is known to be exhausted at `now`
    pub fn check_at(&self, category: RateCategory, now: DateTime<Utc>) -> Result<()> {
        match self.get(category) {
            Some(rate) if rate.is_exhausted_at(now) => {
                tracing::warn!(
                    %category,
                    reset = %rate.reset,
                    "rate limit exhausted, not sending request"
                );
                Err(Error::RateLimitExceeded {
                    category,
                    reset: rate.reset,
                })
            }
            _ => Ok(()),
        }
    }

    /// Fail if `category` is known to be exhausted now
    pub fn check(&self, category: RateCategory) -> Result<()> {
        self.check_at(category, Utc::now())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RateCategory, Rate>> {
        self.rates.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
