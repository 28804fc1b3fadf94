//! Repository addressing and identity wrappers for run retrieval.

use url::Url;

use super::error::RetrievalError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, RetrievalError> {
        if value.is_empty() {
            return Err(RetrievalError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, RetrievalError> {
        if value.is_empty() {
            return Err(RetrievalError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Numeric GitHub Actions workflow identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkflowId(u64);

impl WorkflowId {
    /// Wraps a workflow identifier.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::InvalidWorkflowId` for zero.
    pub const fn new(value: u64) -> Result<Self, RetrievalError> {
        if value == 0 {
            return Err(RetrievalError::InvalidWorkflowId);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, RetrievalError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RetrievalError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

const GITHUB_API: &str = "https://api.github.com";

/// Derives the GitHub API base URL from a host string.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, RetrievalError> {
    if host.eq_ignore_ascii_case("github.com") {
        Url::parse(GITHUB_API).map_err(|error| RetrievalError::InvalidUrl(error.to_string()))
    } else {
        let authority = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
            .map_err(|error| RetrievalError::InvalidUrl(error.to_string()))?;

        api_url
            .set_port(port)
            .map_err(|()| RetrievalError::InvalidUrl("invalid port".to_owned()))?;
        api_url.set_path("api/v3");
        Ok(api_url)
    }
}

/// A GitHub repository together with the API base used to reach it.
///
/// # Example
///
/// ```
/// use runsweep::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("octo/repo").expect("should parse slug");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings.
    ///
    /// Uses `github.com` as the default host.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, RetrievalError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base =
            Url::parse(GITHUB_API).map_err(|error| RetrievalError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses either an `<owner>/<repo>` slug or a repository URL such as
    /// `https://github.com/<owner>/<repo>`.
    ///
    /// Enterprise hosts get an `/api/v3` API base on the same host.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::InvalidUrl` when URL parsing fails or
    /// `MissingPathSegments` when owner or repository is absent.
    pub fn parse(input: &str) -> Result<Self, RetrievalError> {
        if !input.contains("://") {
            let (owner, repo) = input
                .trim_matches('/')
                .split_once('/')
                .ok_or(RetrievalError::MissingPathSegments)?;
            if repo.contains('/') {
                return Err(RetrievalError::MissingPathSegments);
            }
            return Self::from_owner_repo(owner, repo);
        }

        let parsed =
            Url::parse(input).map_err(|error| RetrievalError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(RetrievalError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(RetrievalError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(RetrievalError::MissingPathSegments)?;

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment.trim_end_matches(".git"))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| RetrievalError::InvalidUrl("URL must include a host".to_owned()))?;
        let api_base = derive_api_base_from_host(parsed.scheme(), host, parsed.port())?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// Replaces the API base, e.g. for GitHub Enterprise or a local mock.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::InvalidUrl` when the base cannot be parsed.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, RetrievalError> {
        self.api_base =
            Url::parse(api_base).map_err(|error| RetrievalError::InvalidUrl(error.to_string()))?;
        Ok(self)
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path listing workflow runs, scoped to one workflow
    /// when an identifier is given.
    pub(crate) fn runs_path(&self, workflow: Option<WorkflowId>) -> String {
        let owner = self.owner.as_str();
        let repository = self.repository.as_str();
        match workflow {
            Some(id) => format!(
                "/repos/{owner}/{repository}/actions/workflows/{}/runs",
                id.get()
            ),
            None => format!("/repos/{owner}/{repository}/actions/runs"),
        }
    }
}
