//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::RetrievalError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// The client sends the token as a bearer credential. Octocrab already pins
/// `X-GitHub-Api-Version`, so no version header is added here.
///
/// # Errors
///
/// Returns `RetrievalError::InvalidUrl` when the base URI cannot be parsed or
/// is rejected by Octocrab, and `RetrievalError::Network` when the HTTP
/// client cannot be constructed.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, RetrievalError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| RetrievalError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| RetrievalError::InvalidUrl(format!("rejected API base: {error}")))?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
