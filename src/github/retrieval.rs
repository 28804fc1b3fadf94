//! Complete workflow run retrieval across GitHub's per-query result cap.
//!
//! GitHub stops paginating a filtered run listing after 1000 matches while
//! `total_count` keeps reporting the real number. [`RunRetrieval`] detects a
//! saturated window, moves the upper creation-time bound to just before the
//! oldest run collected so far, and queries again until the history (or the
//! requested lower bound) is covered.
//!
//! The one-second step back guards against re-fetching the boundary run.
//! It assumes runs sharing the boundary second were all returned by the
//! saturated window; a run created in that same second but cut off by the cap
//! is not retrieved.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::error::RetrievalError;
use super::filter::{CreatedRange, RunFilter};
use super::gateway::RunsGateway;
use super::locator::RepositoryLocator;
use super::models::WorkflowRun;
use super::pagination::{RunAccumulator, WindowFetcher, WindowOutcome};
use super::progress::ProgressObserver;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Number of runs GitHub serves for a single filtered query.
pub const RESULT_CAP: u64 = 1000;

/// Why a retrieval stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The last window was not saturated, so everything it matched was read.
    Exhausted,
    /// A run older than the requested lower bound was reached.
    LowerBoundReached,
    /// A saturated window returned nothing new.
    Stalled,
}

/// Mutable state carried between windows.
#[derive(Debug, Default)]
struct WindowState {
    window: u32,
    until: Option<DateTime<Utc>>,
    accumulator: RunAccumulator,
}

/// Retrieves every run matching a filter, newest first.
///
/// # Example
///
/// ```ignore
/// use runsweep::{
///     NoProgress, OctocrabRunsGateway, PersonalAccessToken, RepositoryLocator, RunFilter,
///     RunRetrieval,
/// };
///
/// let token = PersonalAccessToken::new("ghp_example")?;
/// let locator = RepositoryLocator::parse("owner/repo")?;
/// let gateway = OctocrabRunsGateway::for_token(&token, &locator)?;
/// let runs = RunRetrieval::new(&gateway)
///     .retrieve(&locator, &RunFilter::default(), None, &mut NoProgress)
///     .await?;
/// ```
pub struct RunRetrieval<'client, Gateway>
where
    Gateway: RunsGateway + ?Sized,
{
    client: &'client Gateway,
    telemetry: &'client dyn TelemetrySink,
    cap: u64,
}

impl<'client, Gateway> RunRetrieval<'client, Gateway>
where
    Gateway: RunsGateway + ?Sized,
{
    /// Creates a retrieval over `client` with GitHub's result cap and no
    /// telemetry.
    #[must_use]
    pub fn new(client: &'client Gateway) -> Self {
        Self {
            client,
            telemetry: &NoopTelemetrySink,
            cap: RESULT_CAP,
        }
    }

    /// Reports retrieval events to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: &'client dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Overrides the per-query cap used to decide when a window is saturated.
    #[must_use]
    pub const fn with_cap(mut self, cap: u64) -> Self {
        self.cap = cap;
        self
    }

    /// Retrieves all runs matching `filter` created at or after `since`.
    ///
    /// Requests are issued one at a time. `progress` is told the cumulative
    /// number of unique runs and the best-known total after every page.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error unchanged; runs gathered before the
    /// failure are discarded.
    pub async fn retrieve<P>(
        &self,
        locator: &RepositoryLocator,
        filter: &RunFilter,
        since: Option<DateTime<Utc>>,
        progress: &mut P,
    ) -> Result<Vec<WorkflowRun>, RetrievalError>
    where
        P: ProgressObserver + ?Sized,
    {
        let fetcher = WindowFetcher {
            gateway: self.client,
            locator,
            filter,
            telemetry: self.telemetry,
        };
        let mut state = WindowState::default();

        let termination = loop {
            state.window = state.window.saturating_add(1);
            let created = CreatedRange::new(since, state.until);
            let outcome = fetcher
                .fetch(state.window, created, &mut state.accumulator, progress)
                .await?;
            state.accumulator.sort_newest_first();

            self.telemetry.record(TelemetryEvent::WindowCompleted {
                window: state.window,
                pages: outcome.pages,
                new_runs: outcome.new_runs,
                duplicates: outcome.duplicates,
                total_count: outcome.total_count,
            });

            if let Some(termination) = self.termination_for(&outcome) {
                break termination;
            }

            let Some(until) = next_upper_bound(&state.accumulator) else {
                break Termination::Stalled;
            };
            if since.is_some_and(|bound| until < bound) {
                break Termination::LowerBoundReached;
            }

            tracing::debug!(
                "window {} saturated at {} runs; next window ends at {until}",
                state.window,
                outcome.total_count
            );
            self.telemetry.record(TelemetryEvent::WindowSlid {
                window: state.window,
                until,
            });
            state.until = Some(until);
        };

        let runs = state.accumulator.into_runs();
        self.telemetry.record(TelemetryEvent::RetrievalFinished {
            windows: state.window,
            runs: runs.len(),
            termination,
        });
        Ok(runs)
    }

    const fn termination_for(&self, outcome: &WindowOutcome) -> Option<Termination> {
        if outcome.reached_lower_bound {
            Some(Termination::LowerBoundReached)
        } else if outcome.total_count <= self.cap {
            Some(Termination::Exhausted)
        } else if outcome.new_runs == 0 {
            Some(Termination::Stalled)
        } else {
            None
        }
    }
}

/// One second before the oldest run collected so far.
fn next_upper_bound(accumulator: &RunAccumulator) -> Option<DateTime<Utc>> {
    accumulator
        .oldest_created_at()?
        .checked_sub_signed(TimeDelta::seconds(1))
}

#[cfg(test)]
#[path = "retrieval_tests.rs"]
mod tests;
