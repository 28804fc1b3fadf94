//! Error types exposed by the workflow run retrieval layer.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced while parsing input or retrieving workflow runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetrievalError {
    /// GitHub answered with a non-success status.
    ///
    /// The response body is kept verbatim so callers can classify the
    /// failure (bad credentials, missing repository, rate limiting) without
    /// re-issuing the request.
    #[error("GitHub returned {status} for {path}: {body}")]
    Transport {
        /// HTTP status of the failed response.
        status: StatusCode,
        /// Raw response body.
        body: String,
        /// Request path, including the query string.
        path: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A success response did not have the expected shape.
    #[error("unexpected response from {path}: {message}")]
    UnexpectedResponse {
        /// Request path, including the query string.
        path: String,
        /// Deserialisation failure detail.
        message: String,
    },

    /// The time window expression could not be parsed.
    #[error("invalid time window `{input}`: expected <n>h, <n>d, <n>w, or a date")]
    InvalidWindow {
        /// The rejected input.
        input: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// The provided URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository owner or name is missing.
    #[error("repository must be given as <owner>/<repo>")]
    MissingPathSegments,

    /// The workflow identifier is not a positive integer.
    #[error("workflow id must be a positive integer")]
    InvalidWorkflowId,

    /// The run status filter is not one GitHub understands.
    #[error("unknown run status: {value}")]
    InvalidStatus {
        /// The rejected status value.
        value: String,
    },

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl RetrievalError {
    /// Returns the HTTP status for transport failures.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}
