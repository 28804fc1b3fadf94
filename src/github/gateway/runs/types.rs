//! Query type for the runs gateway.

use url::form_urlencoded;

use crate::github::filter::{CreatedRange, RunFilter};

/// Largest page GitHub serves for run listings.
pub const MAX_PER_PAGE: u8 = 100;

/// Parameters for one page of a workflow run listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunsPageQuery {
    /// Fixed filters for the retrieval.
    pub filter: RunFilter,
    /// Creation-time window.
    pub created: CreatedRange,
    /// Page number to fetch (1-based).
    pub page: u32,
    /// Items per page (max 100).
    pub per_page: u8,
}

impl RunsPageQuery {
    /// Builds the query for the first full-size page of a window.
    #[must_use]
    pub fn first_page(filter: &RunFilter, created: CreatedRange) -> Self {
        Self {
            filter: filter.clone(),
            created,
            page: 1,
            per_page: MAX_PER_PAGE,
        }
    }

    /// Returns the same query pointed at the following page.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Encodes the query string. The workflow id is not included; it scopes
    /// the request path instead.
    pub(crate) fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(branch) = self.filter.branch.as_deref() {
            serializer.append_pair("branch", branch);
        }
        if let Some(status) = self.filter.status {
            serializer.append_pair("status", status.as_str());
        }
        if let Some(created) = self.created.to_query_value() {
            serializer.append_pair("created", &created);
        }
        serializer.append_pair("per_page", &self.per_page.to_string());
        serializer.append_pair("page", &self.page.to_string());
        serializer.finish()
    }
}
