//! Item rendering for the CLI

use crate::github::{CodeScanningAlert, HookDelivery, Issue, Repository, WorkflowRun};
use crate::types::OutputFormat;
use serde::Serialize;
use std::io::Write;

/// One-line human-readable rendering
pub trait Summary {
    /// Tab-separated summary without a trailing newline
    fn summary(&self) -> String;
}

impl Summary for Repository {
    fn summary(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.full_name,
            self.stargazers_count,
            self.description.as_deref().unwrap_or("")
        )
    }
}

impl Summary for Issue {
    fn summary(&self) -> String {
        let kind = if self.is_pull_request() { "pr" } else { "issue" };
        format!("#{}\t{kind}\t{}\t{}", self.number, self.state, self.title)
    }
}

impl Summary for WorkflowRun {
    fn summary(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.id,
            self.status.as_deref().unwrap_or("-"),
            self.conclusion.as_deref().unwrap_or("-"),
            self.head_branch.as_deref().unwrap_or("-"),
            self.name.as_deref().unwrap_or("")
        )
    }
}

impl Summary for HookDelivery {
    fn summary(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.id,
            self.delivered_at.to_rfc3339(),
            self.status_code.map_or_else(|| "-".to_string(), |c| c.to_string()),
            self.event.as_deref().unwrap_or("")
        )
    }
}

impl Summary for CodeScanningAlert {
    fn summary(&self) -> String {
        let rule = self.rule.as_ref();
        format!(
            "#{}\t{}\t{}\t{}",
            self.number,
            self.state,
            rule.and_then(|r| r.id.as_deref()).unwrap_or("-"),
            rule.and_then(|r| r.severity.as_deref()).unwrap_or("-")
        )
    }
}

/// Write one item as a line in `format`
pub fn write_item<T, W>(out: &mut W, format: OutputFormat, item: &T) -> std::io::Result<()>
where
    T: Serialize + Summary,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, item)?;
            writeln!(out)
        }
        OutputFormat::Text => writeln!(out, "{}", item.summary()),
    }
}
