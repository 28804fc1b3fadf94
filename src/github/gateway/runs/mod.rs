//! Octocrab-backed gateway for listing workflow runs.

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;

use crate::github::error::RetrievalError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{ApiRunsPage, RunsPage};

use super::RunsGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

mod types;

pub use types::{MAX_PER_PAGE, RunsPageQuery};

/// Octocrab-backed runs gateway.
///
/// Each call issues exactly one GET. Non-success responses are returned as
/// [`RetrievalError::Transport`] with the raw body; nothing is retried.
pub struct OctocrabRunsGateway {
    client: Octocrab,
}

impl OctocrabRunsGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::InvalidUrl` when the base URI cannot be parsed
    /// or `RetrievalError::Network` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, RetrievalError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl RunsGateway for OctocrabRunsGateway {
    async fn list_runs(
        &self,
        locator: &RepositoryLocator,
        query: &RunsPageQuery,
    ) -> Result<RunsPage, RetrievalError> {
        validate_pagination_params(query.page, query.per_page)?;

        let path = format!(
            "{}?{}",
            locator.runs_path(query.filter.workflow_id),
            query.encode()
        );
        let uri: Uri = path
            .parse::<Uri>()
            .map_err(|error| RetrievalError::InvalidUrl(error.to_string()))?;

        let response = self
            .client
            ._get_with_headers(uri, None)
            .await
            .map_err(|error| map_octocrab_error(&path, &error))?;
        let status = response.status();
        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error(&path, &error))?;

        if !status.is_success() {
            tracing::debug!("GET {path} failed with {status}");
            return Err(RetrievalError::Transport { status, body, path });
        }

        let api: ApiRunsPage =
            serde_json::from_str(&body).map_err(|error| RetrievalError::UnexpectedResponse {
                path,
                message: error.to_string(),
            })?;
        Ok(api.into())
    }
}

fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), RetrievalError> {
    if page == 0 {
        return Err(RetrievalError::InvalidPagination {
            message: "page must be at least 1".to_owned(),
        });
    }

    if per_page == 0 {
        return Err(RetrievalError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_PER_PAGE {
        return Err(RetrievalError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}
