//! Support modules for the run retrieval BDD tests.

pub(crate) mod domain;
pub(crate) mod harness;
pub(crate) mod mock_github;
pub(crate) mod state;

pub(crate) use domain::{RequestCount, RunCount};
pub(crate) use harness::{CappedHistory, NEWEST_RUN_AT, RUNS_PATH};
pub(crate) use state::{RetrievalState, retrieve_runs};
