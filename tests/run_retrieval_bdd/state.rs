//! Scenario state and retrieval driver for the run retrieval BDD tests.

use chrono::{DateTime, Utc};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use runsweep::{
    NoProgress, OctocrabRunsGateway, PersonalAccessToken, RepositoryLocator, RetrievalError,
    RunFilter, RunRetrieval, WorkflowRun,
};
use wiremock::Mock;

use super::mock_github::MockGitHub;

#[derive(ScenarioState, Default)]
pub(crate) struct RetrievalState {
    pub(crate) github: Slot<MockGitHub>,
    pub(crate) token: Slot<String>,
    pub(crate) result: Slot<Vec<WorkflowRun>>,
    pub(crate) error: Slot<RetrievalError>,
}

impl RetrievalState {
    /// Returns the scenario's mock API, starting it on first use.
    pub(crate) fn github(&self) -> MockGitHub {
        if let Some(github) = self.github.get() {
            return github;
        }
        let github = MockGitHub::start()
            .unwrap_or_else(|error| panic!("failed to start mock GitHub API: {error}"));
        self.github.set(github.clone());
        github
    }

    pub(crate) fn mount(&self, mock: Mock) {
        self.github().mount(mock);
    }

    pub(crate) fn received_requests(&self) -> usize {
        self.github().request_count()
    }
}

/// Runs a full retrieval against the mock server, recording the outcome.
pub(crate) fn retrieve_runs(
    state: &RetrievalState,
    repo_url: &str,
    since: Option<DateTime<Utc>>,
) {
    match run_retrieval(state, repo_url, since) {
        Ok(runs) => {
            let _had_previous_error = state.error.take().is_some();
            state.result.set(runs);
        }
        Err(error) => {
            let _had_previous_result = state.result.take().is_some();
            state.error.set(error);
        }
    }
}

fn run_retrieval(
    state: &RetrievalState,
    repo_url: &str,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<WorkflowRun>, RetrievalError> {
    let github = state.github();
    let locator = RepositoryLocator::parse(&github.repository_url(repo_url))?;

    github.block_on(async {
        let token_value = state.token.get().ok_or(RetrievalError::MissingToken)?;
        let token = PersonalAccessToken::new(token_value)?;
        let gateway = OctocrabRunsGateway::for_token(&token, &locator)?;

        RunRetrieval::new(&gateway)
            .retrieve(&locator, &RunFilter::default(), since, &mut NoProgress)
            .await
    })
}
