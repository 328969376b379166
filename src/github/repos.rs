//! Repository endpoints

use super::models::{HookDelivery, Repository};
use super::options::{ListCursorOptions, RepoListByOrgOptions, RepoListForUserOptions};
use super::{require, GitHubClient};
use crate::error::{Error, Result};
use crate::pagination::{ListFn, Page, Pager};

/// Handler for `/orgs/{org}/repos`, `/users/{user}/repos` and webhook deliveries
#[derive(Debug, Clone, Copy)]
pub struct RepositoriesHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepositoriesHandler<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// List one page of an organization's repositories
    pub async fn list_by_org(
        &self,
        org: &str,
        opts: Option<&RepoListByOrgOptions>,
    ) -> Result<Page<Repository>> {
        let url = self
            .client
            .endpoint(&["orgs", require("org", org)?, "repos"])?;
        let (items, meta) = self.client.get_page::<Vec<Repository>, _>(&url, &opts).await?;
        Ok(Page::new(items, meta))
    }

    /// Every repository of an organization, fetched page by page
    pub fn list_by_org_iter(
        self,
        org: &'a str,
        opts: Option<&RepoListByOrgOptions>,
    ) -> Pager<
        RepoListByOrgOptions,
        impl ListFn<RepoListByOrgOptions, Item = Repository, Error = Error> + 'a,
    > {
        Pager::from_ref(opts, move |opts: RepoListByOrgOptions| async move {
            self.list_by_org(org, Some(&opts)).await
        })
    }

    /// List one page of a user's public repositories
    pub async fn list_for_user(
        &self,
        user: &str,
        opts: Option<&RepoListForUserOptions>,
    ) -> Result<Page<Repository>> {
        let url = self
            .client
            .endpoint(&["users", require("user", user)?, "repos"])?;
        let (items, meta) = self.client.get_page::<Vec<Repository>, _>(&url, &opts).await?;
        Ok(Page::new(items, meta))
    }

    /// Every public repository of a user, fetched page by page
    pub fn list_for_user_iter(
        self,
        user: &'a str,
        opts: Option<&RepoListForUserOptions>,
    ) -> Pager<
        RepoListForUserOptions,
        impl ListFn<RepoListForUserOptions, Item = Repository, Error = Error> + 'a,
    > {
        Pager::from_ref(opts, move |opts: RepoListForUserOptions| async move {
            self.list_for_user(user, Some(&opts)).await
        })
    }

    /// List one page of deliveries of a repository webhook
    ///
    /// This endpoint pages by cursor only.
    pub async fn list_hook_deliveries(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        opts: Option<&ListCursorOptions>,
    ) -> Result<Page<HookDelivery>> {
        let hook_id = hook_id.to_string();
        let url = self.client.endpoint(&[
            "repos",
            require("owner", owner)?,
            require("repo", repo)?,
            "hooks",
            hook_id.as_str(),
            "deliveries",
        ])?;
        let (items, meta) = self.client.get_page::<Vec<HookDelivery>, _>(&url, &opts).await?;
        Ok(Page::new(items, meta))
    }

    /// Every delivery of a repository webhook, fetched page by page
    pub fn list_hook_deliveries_iter(
        self,
        owner: &'a str,
        repo: &'a str,
        hook_id: u64,
        opts: Option<&ListCursorOptions>,
    ) -> Pager<ListCursorOptions, impl ListFn<ListCursorOptions, Item = HookDelivery, Error = Error> + 'a>
    {
        Pager::from_ref(opts, move |opts: ListCursorOptions| async move {
            self.list_hook_deliveries(owner, repo, hook_id, Some(&opts))
                .await
        })
    }
}
