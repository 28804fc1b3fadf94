//! Error mapping helpers for the Octocrab gateway implementation.

use http::StatusCode;

use crate::github::error::RetrievalError;

use super::http_utils::{extract_documentation_url, extract_github_message};

/// Checks whether a failed response represents rate limiting, based on the
/// HTTP status and its body.
///
/// JSON bodies are judged by their documentation URL or message; any other
/// body by its raw text.
#[must_use]
pub fn is_rate_limit_body(status: StatusCode, body: &str) -> bool {
    let is_rate_limit_status = matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let text = extract_github_message(body).unwrap_or_else(|| body.to_owned());
    let body_indicates_rate_limit = text.to_lowercase().contains("rate limit")
        || extract_documentation_url(body).is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && body_indicates_rate_limit
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Maps an Octocrab failure raised before a response was available.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> RetrievalError {
    if is_network_error(error) {
        return RetrievalError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    RetrievalError::UnexpectedResponse {
        path: operation.to_owned(),
        message: error.to_string(),
    }
}
