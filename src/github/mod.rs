//! GitHub Actions workflow run retrieval.
//!
//! This module wraps Octocrab to list workflow runs for a repository and
//! works around the Actions API's per-query result cap by sliding the
//! creation-time window until the whole matching history has been read.
//! Errors keep the HTTP status and raw body so callers can explain failures
//! without exposing Octocrab internals.

pub mod error;
pub mod filter;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod progress;
pub mod retrieval;
pub mod window;

pub use error::RetrievalError;
pub use filter::{CreatedRange, RunFilter, RunStatus};
pub use gateway::{
    MAX_PER_PAGE, OctocrabRunsGateway, RunsGateway, RunsPageQuery, is_rate_limit_body,
};
pub use locator::{
    PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner, WorkflowId,
};
pub use models::{RunsPage, WorkflowRun};
pub use pagination::WindowOutcome;
pub use progress::{NoProgress, ProgressObserver};
pub use retrieval::{RESULT_CAP, RunRetrieval, Termination};
pub use window::{parse_since, parse_since_at};

#[cfg(test)]
pub use gateway::MockRunsGateway;

#[cfg(test)]
mod tests;
