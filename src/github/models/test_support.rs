//! Test helpers for constructing workflow run fixtures.
//!
//! [`SimulatedRunsGateway`] reproduces GitHub's result cap: every query
//! reports the true number of matching runs as `total_count`, but only the
//! newest `cap` of them are reachable through pagination.
//!
//! # Examples
//!
//! ```
//! use runsweep::github::models::test_support::{run_at, run_history};
//!
//! let run = run_at(1, "2026-02-15T00:00:00Z");
//! assert_eq!(run.id, 1);
//!
//! let history = run_history(3, "2026-02-15T00:00:00Z", 60);
//! assert_eq!(history.len(), 3);
//! assert!(history.windows(2).all(|pair| pair[0].created_at > pair[1].created_at));
//! ```

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Map, Value, json};

use super::{RunsPage, WorkflowRun};
use crate::github::error::RetrievalError;
use crate::github::gateway::{RunsGateway, RunsPageQuery};
use crate::github::locator::RepositoryLocator;

fn parse_timestamp(created_at: &str) -> DateTime<Utc> {
    created_at
        .parse()
        .unwrap_or_else(|error| panic!("invalid fixture timestamp {created_at}: {error}"))
}

/// Constructs a run with the given id and RFC 3339 creation time.
///
/// # Panics
///
/// Panics when `created_at` is not a valid RFC 3339 timestamp.
#[must_use]
pub fn run_at(id: u64, created_at: &str) -> WorkflowRun {
    run_created(id, parse_timestamp(created_at))
}

/// Constructs a run with the given id and creation time.
#[must_use]
pub fn run_created(id: u64, created_at: DateTime<Utc>) -> WorkflowRun {
    WorkflowRun {
        id,
        display_title: format!("Run {id}"),
        created_at,
        html_url: Some(format!("https://github.com/owner/repo/actions/runs/{id}")),
        extra: Map::new(),
    }
}

/// Builds `count` runs, newest first, starting at `newest` and spaced
/// `spacing_seconds` apart. Ids count down from `count` to 1.
///
/// # Panics
///
/// Panics when `newest` is not a valid RFC 3339 timestamp.
#[must_use]
pub fn run_history(count: u64, newest: &str, spacing_seconds: i64) -> Vec<WorkflowRun> {
    let spacing = TimeDelta::seconds(spacing_seconds);
    let mut created_at = parse_timestamp(newest);
    let mut runs = Vec::new();
    for id in (1..=count).rev() {
        runs.push(run_created(id, created_at));
        created_at -= spacing;
    }
    runs
}

/// Returns the slice of `runs` that `page` of size `per_page` covers.
#[must_use]
pub fn page_slice(runs: &[WorkflowRun], page: u32, per_page: u8) -> Vec<WorkflowRun> {
    let per_page_len = usize::from(per_page);
    let skip = usize::try_from(page.saturating_sub(1))
        .unwrap_or(usize::MAX)
        .saturating_mul(per_page_len);
    runs.iter().skip(skip).take(per_page_len).cloned().collect()
}

/// Renders runs as an Actions API response body.
#[must_use]
pub fn runs_page_body(runs: &[WorkflowRun], total_count: u64) -> Value {
    json!({
        "total_count": total_count,
        "workflow_runs": runs,
    })
}

/// In-memory runs gateway that applies creation-time filters and GitHub's
/// pagination cap to a fixed history.
#[derive(Debug)]
pub struct SimulatedRunsGateway {
    history: Vec<WorkflowRun>,
    cap: usize,
    fail_on_call: Option<(usize, RetrievalError)>,
    queries: Mutex<Vec<RunsPageQuery>>,
}

impl SimulatedRunsGateway {
    /// Creates a gateway over `history` with GitHub's 1000-run cap.
    #[must_use]
    pub fn new(mut history: Vec<WorkflowRun>) -> Self {
        history.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Self {
            history,
            cap: 1000,
            fail_on_call: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the number of runs reachable per query.
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Fails the `call`-th request (1-based) with `error`.
    #[must_use]
    pub fn failing_on_call(mut self, call: usize, error: RetrievalError) -> Self {
        self.fail_on_call = Some((call, error));
        self
    }

    /// Returns every query received so far.
    #[must_use]
    pub fn queries(&self) -> Vec<RunsPageQuery> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RunsGateway for SimulatedRunsGateway {
    async fn list_runs(
        &self,
        _locator: &RepositoryLocator,
        query: &RunsPageQuery,
    ) -> Result<RunsPage, RetrievalError> {
        let call = {
            let mut queries = self.queries.lock().unwrap_or_else(PoisonError::into_inner);
            queries.push(query.clone());
            queries.len()
        };
        if let Some((failing_call, error)) = &self.fail_on_call
            && *failing_call == call
        {
            return Err(error.clone());
        }

        let since = query.created.since();
        let until = query.created.until();
        let matching: Vec<WorkflowRun> = self
            .history
            .iter()
            .filter(|run| since.is_none_or(|bound| run.created_at >= bound))
            .filter(|run| until.is_none_or(|bound| run.created_at <= bound))
            .cloned()
            .collect();
        let reachable_len = matching.len().min(self.cap);
        let reachable = matching.get(..reachable_len).unwrap_or_default();

        Ok(RunsPage {
            runs: page_slice(reachable, query.page, query.per_page),
            total_count: u64::try_from(matching.len()).unwrap_or(u64::MAX),
        })
    }
}
