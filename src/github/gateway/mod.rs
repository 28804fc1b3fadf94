//! Gateways for listing workflow runs through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod runs;

pub use error_mapping::is_rate_limit_body;
pub use runs::{MAX_PER_PAGE, OctocrabRunsGateway, RunsPageQuery};

use async_trait::async_trait;

use crate::github::error::RetrievalError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::RunsPage;

/// Gateway that can list one page of workflow runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RunsGateway: Send + Sync {
    /// Fetch a single page of runs matching the query.
    async fn list_runs(
        &self,
        locator: &RepositoryLocator,
        query: &RunsPageQuery,
    ) -> Result<RunsPage, RetrievalError>;
}
