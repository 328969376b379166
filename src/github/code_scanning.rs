//! Code scanning endpoints

use super::models::CodeScanningAlert;
use super::options::AlertListOptions;
use super::{require, GitHubClient};
use crate::error::{Error, Result};
use crate::pagination::{ListFn, Page, Pager};

/// Handler for `/repos/{owner}/{repo}/code-scanning`
#[derive(Debug, Clone, Copy)]
pub struct CodeScanningHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> CodeScanningHandler<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// List one page of a repository's code scanning alerts
    pub async fn list_alerts_for_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&AlertListOptions>,
    ) -> Result<Page<CodeScanningAlert>> {
        let url = self.client.endpoint(&[
            "repos",
            require("owner", owner)?,
            require("repo", repo)?,
            "code-scanning",
            "alerts",
        ])?;
        let (items, meta) = self
            .client
            .get_page::<Vec<CodeScanningAlert>, _>(&url, &opts)
            .await?;
        Ok(Page::new(items, meta))
    }

    /// Every code scanning alert of a repository, fetched page by page
    ///
    /// Continues by cursor or page number, whichever the server sends.
    pub fn list_alerts_for_repo_iter(
        self,
        owner: &'a str,
        repo: &'a str,
        opts: Option<&AlertListOptions>,
    ) -> Pager<AlertListOptions, impl ListFn<AlertListOptions, Item = CodeScanningAlert, Error = Error> + 'a>
    {
        Pager::from_ref(opts, move |opts: AlertListOptions| async move {
            self.list_alerts_for_repo(owner, repo, Some(&opts)).await
        })
    }
}
