//! CLI runner - executes commands

use super::commands::{Cli, Commands};
use super::format::{write_item, Summary};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::github::{
    AlertListOptions, GitHubClient, IssueListByRepoOptions, ListCursorOptions, ListOptions,
    ListWorkflowRunsOptions, RepoListByOrgOptions, RepoListForUserOptions,
};
use crate::pagination::{ListFn, Paginated, Pager};
use crate::types::{LogLevel, OutputFormat};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parsed command line
    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Build the client configuration: file, then environment, then flags
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        config.apply_env();
        if let Some(url) = &self.cli.base_url {
            config.api_url.clone_from(url);
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    /// Log level to run with
    pub fn log_level(&self, config: &ClientConfig) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            config.log_level
        }
    }

    /// Run the command, printing to stdout
    pub async fn run(&self, config: ClientConfig) -> Result<()> {
        let client = GitHubClient::new(config).context("failed to build client")?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        let count = self.execute(&client, &mut out).await?;
        out.flush()?;
        info!(count, "done");
        Ok(())
    }

    /// Run the command against `client`, writing to `out`
    ///
    /// Returns the number of items written.
    pub async fn execute<W: Write>(&self, client: &GitHubClient, out: &mut W) -> Result<usize> {
        let list = self.list_options();

        match &self.cli.command {
            Commands::Repos { org, kind } => {
                let opts = RepoListByOrgOptions {
                    kind: kind.clone(),
                    list,
                    ..Default::default()
                };
                self.emit(client.repos().list_by_org_iter(org, Some(&opts)), out)
                    .await
            }
            Commands::UserRepos { user } => {
                let opts = RepoListForUserOptions {
                    list,
                    ..Default::default()
                };
                self.emit(client.repos().list_for_user_iter(user, Some(&opts)), out)
                    .await
            }
            Commands::Issues {
                owner,
                repo,
                state,
                labels,
            } => {
                let opts = IssueListByRepoOptions {
                    state: state.clone(),
                    labels: labels.clone(),
                    list,
                    ..Default::default()
                };
                self.emit(
                    client.issues().list_by_repo_iter(owner, repo, Some(&opts)),
                    out,
                )
                .await
            }
            Commands::Runs {
                owner,
                repo,
                branch,
                status,
            } => {
                let opts = ListWorkflowRunsOptions {
                    branch: branch.clone(),
                    status: status.clone(),
                    list,
                    ..Default::default()
                };
                self.emit(
                    client
                        .actions()
                        .list_workflow_runs_iter(owner, repo, Some(&opts)),
                    out,
                )
                .await
            }
            Commands::Deliveries {
                owner,
                repo,
                hook_id,
            } => {
                let opts = ListCursorOptions {
                    cursor: None,
                    per_page: list.per_page,
                };
                self.emit(
                    client
                        .repos()
                        .list_hook_deliveries_iter(owner, repo, *hook_id, Some(&opts)),
                    out,
                )
                .await
            }
            Commands::Alerts { owner, repo, state } => {
                let opts = AlertListOptions {
                    state: state.clone(),
                    list,
                    ..Default::default()
                };
                self.emit(
                    client
                        .code_scanning()
                        .list_alerts_for_repo_iter(owner, repo, Some(&opts)),
                    out,
                )
                .await
            }
            Commands::RateLimit => self.rate_limit(client, out).await,
        }
    }

    fn list_options(&self) -> ListOptions {
        ListOptions::default().per_page(self.cli.per_page.unwrap_or(0))
    }

    /// Drain a pager into `out`, stopping at `--limit`
    async fn emit<O, F, W>(&self, mut pager: Pager<O, F>, out: &mut W) -> Result<usize>
    where
        O: Paginated,
        F: ListFn<O, Error = Error>,
        F::Item: Serialize + Summary,
        W: Write,
    {
        let limit = self.cli.limit.unwrap_or(usize::MAX);
        let mut count = 0;

        while count < limit {
            let Some(item) = pager.next().await else {
                break;
            };
            let item = item.context("listing failed")?;
            write_item(out, self.cli.format, &item)?;
            count += 1;
        }

        debug!(count, pages = pager.pages_fetched(), "listing finished");
        Ok(count)
    }

    async fn rate_limit<W: Write>(&self, client: &GitHubClient, out: &mut W) -> Result<usize> {
        let body = client
            .rate_limit()
            .await
            .context("failed to fetch rate limit")?;

        let mut resources: Vec<_> = body.resources.into_iter().collect();
        resources.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, rate) in &resources {
            match self.cli.format {
                OutputFormat::Json => {
                    let line = serde_json::json!({
                        "resource": name,
                        "limit": rate.limit,
                        "remaining": rate.remaining,
                        "used": rate.used,
                        "reset": rate.reset.to_rfc3339(),
                    });
                    writeln!(out, "{line}")?;
                }
                OutputFormat::Text => writeln!(
                    out,
                    "{name}\t{}/{}\t{}",
                    rate.remaining,
                    rate.limit,
                    rate.reset.to_rfc3339()
                )?,
            }
        }

        Ok(resources.len())
    }
}
