//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.runsweep.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `RUNSWEEP_OWNER`, `RUNSWEEP_TOKEN`, and so
//!    on, with `GITHUB_TOKEN` and `GH_TOKEN` as token fallbacks
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`, ...
//!
//! # Configuration File
//!
//! Place `.runsweep.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! token = "ghp_example"
//! branch = "main"
//! status = "failure"
//! since = "7d"
//! ```

use std::env;

use chrono::{DateTime, Utc};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::RetrievalError;
use crate::github::filter::{RunFilter, RunStatus};
use crate::github::locator::{RepositoryLocator, WorkflowId};
use crate::github::window::parse_since;

const TOKEN_FALLBACK_VARIABLES: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `RUNSWEEP_OWNER` or `--owner`: Repository owner
/// - `RUNSWEEP_REPO` or `--repo`: Repository name, slug, or URL
/// - `RUNSWEEP_TOKEN`, `GITHUB_TOKEN`, `GH_TOKEN`, or `--token`:
///   Authentication token
/// - `RUNSWEEP_API_URL` or `--api-url`: API base override
/// - `RUNSWEEP_BRANCH`, `RUNSWEEP_STATUS`, `RUNSWEEP_WORKFLOW_ID`,
///   `RUNSWEEP_SINCE`: Run filters
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use runsweep::RunsweepConfig;
///
/// let config = RunsweepConfig::load().expect("failed to load configuration");
/// let locator = config.repository_locator().expect("repository required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "RUNSWEEP",
    discovery(
        dotfile_name = ".runsweep.toml",
        config_file_name = "runsweep.toml",
        app_name = "runsweep"
    )
)]
pub struct RunsweepConfig {
    /// Repository owner (e.g., "octocat").
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `RUNSWEEP_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    ///
    /// Without an owner this may also be an `owner/repo` slug or a
    /// repository URL.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `RUNSWEEP_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `RUNSWEEP_TOKEN`, then `GITHUB_TOKEN` or `GH_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// API base URL, for GitHub Enterprise Server or a local mock.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>`
    /// - Environment: `RUNSWEEP_API_URL`
    /// - Config file: `api_url = "..."`
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Only list runs triggered for this branch.
    #[ortho_config(cli_short = 'b')]
    pub branch: Option<String>,

    /// Only list runs with this status or conclusion (e.g. `failure`).
    #[ortho_config(cli_short = 's')]
    pub status: Option<String>,

    /// Only list runs of this workflow.
    #[ortho_config(cli_short = 'w')]
    pub workflow_id: Option<u64>,

    /// Lower creation-time bound: `<n>h`, `<n>d`, `<n>w`, or a date.
    #[ortho_config()]
    pub since: Option<String>,

    /// Case-insensitive substring the run title must contain.
    #[ortho_config()]
    pub title_filter: Option<String>,

    /// Prints runs as a JSON array instead of text lines.
    ///
    /// Can be provided via:
    /// - CLI: `--json`
    /// - Config file: `json = true`
    #[ortho_config()]
    pub json: bool,

    /// Writes retrieval telemetry to stderr as JSON lines.
    ///
    /// Can be provided via:
    /// - CLI: `--debug`
    /// - Config file: `debug = true`
    #[ortho_config()]
    pub debug: bool,
}

impl RunsweepConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN` and
    /// `GH_TOKEN` environment variables, in that order.
    ///
    /// Blank values are skipped at every step.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::MissingToken`] when no token source provides
    /// a value.
    pub fn resolve_token(&self) -> Result<String, RetrievalError> {
        let configured = self.token.clone().into_iter();
        let fallbacks = TOKEN_FALLBACK_VARIABLES
            .into_iter()
            .filter_map(|name| env::var(name).ok());
        configured
            .chain(fallbacks)
            .find(|value| !value.trim().is_empty())
            .ok_or(RetrievalError::MissingToken)
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Configuration`] when owner or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), RetrievalError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(RetrievalError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(RetrievalError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Builds the repository locator, honouring `api_url` when set.
    ///
    /// A `repo` given without an `owner` is parsed as a slug or URL.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Configuration`] when the repository is not
    /// configured, or the locator's own validation errors.
    pub fn repository_locator(&self) -> Result<RepositoryLocator, RetrievalError> {
        let locator = match (&self.owner, &self.repo) {
            (None, Some(repository)) => RepositoryLocator::parse(repository)?,
            _ => {
                let (owner, repo) = self.require_repository_info()?;
                RepositoryLocator::from_owner_repo(owner, repo)?
            }
        };
        match &self.api_url {
            Some(api_url) => locator.with_api_base(api_url),
            None => Ok(locator),
        }
    }

    /// Builds the fixed run filter from the branch, status, and workflow
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidStatus`] or
    /// [`RetrievalError::InvalidWorkflowId`] for unusable values.
    pub fn run_filter(&self) -> Result<RunFilter, RetrievalError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<RunStatus>)
            .transpose()?;
        let workflow_id = self.workflow_id.map(WorkflowId::new).transpose()?;
        Ok(RunFilter {
            branch: self.branch.clone(),
            status,
            workflow_id,
        })
    }

    /// Resolves the `since` expression against the current time.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidWindow`] when the expression cannot
    /// be parsed.
    pub fn since(&self) -> Result<Option<DateTime<Utc>>, RetrievalError> {
        self.since.as_deref().map(parse_since).transpose()
    }
}

#[cfg(test)]
mod tests;
