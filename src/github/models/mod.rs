//! Data models representing workflow runs returned by the GitHub API.
//!
//! `WorkflowRun` keeps the fields the retrieval engine inspects as typed
//! values and carries every other field through untouched, so callers can
//! render or re-serialise the full record. Types prefixed with `Api` are
//! internal deserialisation targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// One workflow run as listed by the Actions API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Unique run identifier.
    pub id: u64,
    /// Title shown in the Actions UI (commit message or PR title).
    #[serde(default)]
    pub display_title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Browser URL for the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Remaining fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single page of workflow runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunsPage {
    /// Runs on this page, newest first.
    pub runs: Vec<WorkflowRun>,
    /// Number of runs GitHub reports as matching the whole query.
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRunsPage {
    pub(crate) total_count: u64,
    #[serde(default)]
    pub(crate) workflow_runs: Vec<WorkflowRun>,
}

impl From<ApiRunsPage> for RunsPage {
    fn from(value: ApiRunsPage) -> Self {
        Self {
            runs: value.workflow_runs,
            total_count: value.total_count,
        }
    }
}
