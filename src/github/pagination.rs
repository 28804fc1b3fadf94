//! Page walking for a single run query window.
//!
//! A window is one fixed filter plus one creation-time range. Its pages are
//! fetched in order until GitHub returns a short page or a run falls below
//! the lower bound. Runs are merged into a shared [`RunAccumulator`] so the
//! caller can tell genuinely new runs from ones an earlier window already
//! returned.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::error::RetrievalError;
use super::filter::{CreatedRange, RunFilter};
use super::gateway::{RunsGateway, RunsPageQuery};
use super::locator::RepositoryLocator;
use super::models::WorkflowRun;
use super::progress::ProgressObserver;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Deduplicated, ordered collection of runs gathered across windows.
#[derive(Debug, Default)]
pub(crate) struct RunAccumulator {
    seen: HashSet<u64>,
    runs: Vec<WorkflowRun>,
    best_total: u64,
}

impl RunAccumulator {
    /// Adds a run unless its id was already collected. Returns whether the
    /// run was new.
    pub(crate) fn insert(&mut self, run: WorkflowRun) -> bool {
        if !self.seen.insert(run.id) {
            return false;
        }
        self.runs.push(run);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.runs.len()
    }

    /// Folds a reported `total_count` into the largest total seen.
    pub(crate) fn observe_total(&mut self, total: u64) {
        self.best_total = self.best_total.max(total);
    }

    pub(crate) const fn best_total(&self) -> u64 {
        self.best_total
    }

    /// Sorts newest first. The sort is stable, so runs sharing a timestamp
    /// keep the order GitHub returned them in.
    pub(crate) fn sort_newest_first(&mut self) {
        self.runs
            .sort_by(|left, right| right.created_at.cmp(&left.created_at));
    }

    pub(crate) fn oldest_created_at(&self) -> Option<DateTime<Utc>> {
        self.runs.iter().map(|run| run.created_at).min()
    }

    pub(crate) fn into_runs(self) -> Vec<WorkflowRun> {
        self.runs
    }
}

/// Summary of one paginated window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowOutcome {
    /// Pages requested.
    pub pages: u32,
    /// Runs added to the accumulator.
    pub new_runs: usize,
    /// Runs skipped because their id was already collected.
    pub duplicates: usize,
    /// Largest `total_count` reported by any page of the window.
    pub total_count: u64,
    /// Whether a run older than the lower bound ended the walk.
    pub reached_lower_bound: bool,
}

/// Walks the pages of one window against a fixed repository and filter.
pub(crate) struct WindowFetcher<'a, G>
where
    G: RunsGateway + ?Sized,
{
    pub(crate) gateway: &'a G,
    pub(crate) locator: &'a RepositoryLocator,
    pub(crate) filter: &'a RunFilter,
    pub(crate) telemetry: &'a dyn TelemetrySink,
}

impl<G> WindowFetcher<'_, G>
where
    G: RunsGateway + ?Sized,
{
    /// Fetches every page of `created`, merging runs into `accumulator`.
    ///
    /// GitHub lists runs newest first, so the first run older than the lower
    /// bound ends both the page scan and the window; it and everything after
    /// it on the page are discarded.
    pub(crate) async fn fetch<P>(
        &self,
        window: u32,
        created: CreatedRange,
        accumulator: &mut RunAccumulator,
        progress: &mut P,
    ) -> Result<WindowOutcome, RetrievalError>
    where
        P: ProgressObserver + ?Sized,
    {
        let lower_bound = created.since();
        let mut query = RunsPageQuery::first_page(self.filter, created);
        let mut outcome = WindowOutcome::default();

        loop {
            let page = self.gateway.list_runs(self.locator, &query).await?;
            outcome.pages = outcome.pages.saturating_add(1);
            outcome.total_count = outcome.total_count.max(page.total_count);
            accumulator.observe_total(page.total_count);

            let page_len = page.runs.len();
            self.telemetry.record(TelemetryEvent::PageFetched {
                window,
                page: query.page,
                runs: page_len,
                total_count: page.total_count,
            });
            tracing::debug!(
                "window {window} page {} returned {page_len} runs (total_count {})",
                query.page,
                page.total_count
            );

            for run in page.runs {
                if lower_bound.is_some_and(|bound| run.created_at < bound) {
                    outcome.reached_lower_bound = true;
                    break;
                }
                if accumulator.insert(run) {
                    outcome.new_runs += 1;
                } else {
                    outcome.duplicates += 1;
                }
            }

            progress.on_progress(accumulator.len(), accumulator.best_total());

            if outcome.reached_lower_bound || page_len < usize::from(query.per_page) {
                return Ok(outcome);
            }
            query = query.next_page();
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
