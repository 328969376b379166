//! CLI module
//!
//! Command-line interface over the list endpoints.
//!
//! # Commands
//!
//! - `repos` - Repositories of an organization
//! - `user-repos` - Public repositories of a user
//! - `issues` - Issues of a repository
//! - `runs` - Workflow runs of a repository
//! - `deliveries` - Webhook deliveries (cursor paginated)
//! - `alerts` - Code scanning alerts
//! - `rate-limit` - Current API quota

mod commands;
mod format;
mod runner;

pub use commands::{Cli, Commands};
pub use format::{write_item, Summary};
pub use runner::Runner;
