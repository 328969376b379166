//! GitHub Actions endpoints

use super::models::{WorkflowRun, WorkflowRuns};
use super::options::ListWorkflowRunsOptions;
use super::{require, GitHubClient};
use crate::error::{Error, Result};
use crate::pagination::{ListFn, Page, Pager};

/// Handler for `/repos/{owner}/{repo}/actions`
#[derive(Debug, Clone, Copy)]
pub struct ActionsHandler<'a> {
    client: &'a GitHubClient,
}

impl<'a> ActionsHandler<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// List one page of a repository's workflow runs
    ///
    /// The response nests the runs under `workflow_runs`; the returned page
    /// holds the runs themselves. The total count is logged and dropped.
    pub async fn list_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListWorkflowRunsOptions>,
    ) -> Result<Page<WorkflowRun>> {
        let url = self.client.endpoint(&[
            "repos",
            require("owner", owner)?,
            require("repo", repo)?,
            "actions",
            "runs",
        ])?;
        let (body, meta) = self.client.get_page::<WorkflowRuns, _>(&url, &opts).await?;
        tracing::trace!(total_count = body.total_count, "workflow runs");
        Ok(Page::new(body.workflow_runs, meta))
    }

    /// Every workflow run of a repository, fetched page by page
    pub fn list_workflow_runs_iter(
        self,
        owner: &'a str,
        repo: &'a str,
        opts: Option<&ListWorkflowRunsOptions>,
    ) -> Pager<
        ListWorkflowRunsOptions,
        impl ListFn<ListWorkflowRunsOptions, Item = WorkflowRun, Error = Error> + 'a,
    > {
        Pager::from_ref(opts, move |opts: ListWorkflowRunsOptions| async move {
            self.list_workflow_runs(owner, repo, Some(&opts)).await
        })
    }
}
