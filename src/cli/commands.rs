//! CLI commands and argument parsing

use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List GitHub resources page by page
#[derive(Parser, Debug)]
#[command(name = "ghlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API root, e.g. https://github.example.com/api/v3
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Stop after this many items; later pages are never requested
    #[arg(short = 'n', long, global = true)]
    pub limit: Option<usize>,

    /// Items per page
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Repositories of an organization
    Repos {
        org: String,

        /// all, public, private, forks, sources or member
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Public repositories of a user
    UserRepos { user: String },

    /// Issues and pull requests of a repository
    Issues {
        owner: String,
        repo: String,

        /// open, closed or all
        #[arg(long)]
        state: Option<String>,

        /// Only issues with this label (repeatable)
        #[arg(long = "label")]
        labels: Vec<String>,
    },

    /// Workflow runs of a repository
    Runs {
        owner: String,
        repo: String,

        #[arg(long)]
        branch: Option<String>,

        /// Status or conclusion, e.g. completed or failure
        #[arg(long)]
        status: Option<String>,
    },

    /// Deliveries of a repository webhook
    Deliveries {
        owner: String,
        repo: String,
        hook_id: u64,
    },

    /// Code scanning alerts of a repository
    Alerts {
        owner: String,
        repo: String,

        /// open, closed, dismissed or fixed
        #[arg(long)]
        state: Option<String>,
    },

    /// Current API quota
    RateLimit,
}
