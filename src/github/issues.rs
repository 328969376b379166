//! Issue endpoints

use super::models::Issue;
use super::options::IssueListByRepoOptions;
use super::{require, GitHubClient};
use crate::error::{Error, Result};
use crate::pagination::{ListFn, Page, Pager};

/// Handler for `/repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Copy)]
pub struct IssuesHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> IssuesHandler<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// List one page of a repository's issues, pull requests included
    pub async fn list_by_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&IssueListByRepoOptions>,
    ) -> Result<Page<Issue>> {
        let url = self.client.endpoint(&[
            "repos",
            require("owner", owner)?,
            require("repo", repo)?,
            "issues",
        ])?;
        let (items, meta) = self.client.get_page::<Vec<Issue>, _>(&url, &opts).await?;
        Ok(Page::new(items, meta))
    }

    /// Every issue of a repository, fetched page by page
    pub fn list_by_repo_iter(
        self,
        owner: &'a str,
        repo: &'a str,
        opts: Option<&IssueListByRepoOptions>,
    ) -> Pager<IssueListByRepoOptions, impl ListFn<IssueListByRepoOptions, Item = Issue, Error = Error> + 'a>
    {
        Pager::from_ref(opts, move |opts: IssueListByRepoOptions| async move {
            self.list_by_repo(owner, repo, Some(&opts)).await
        })
    }
}
