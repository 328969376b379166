//! HTTP client module
//!
//! Provides the transport shared by every endpoint call.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Throttling**: Token bucket rate limiter using governor
//! - **Quota Tracking**: `X-RateLimit-*` bookkeeping per category, with
//!   local failure once a category is known to be exhausted
//! - **Authentication**: Bearer or basic credentials on every request

mod client;
mod quota;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use quota::{Rate, RateCategory, RateLimits};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
