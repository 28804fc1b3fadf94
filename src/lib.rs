//! Runsweep library crate for complete GitHub Actions run retrieval.
//!
//! The library lists workflow runs through Octocrab, slides the creation-time
//! window past GitHub's 1000-result cap, parses human time windows such as
//! `7d`, and surfaces errors that the CLI can turn into remediation hints.

pub mod config;
pub mod github;
pub mod telemetry;

pub use config::RunsweepConfig;
pub use github::{
    NoProgress, OctocrabRunsGateway, PersonalAccessToken, ProgressObserver, RepositoryLocator,
    RetrievalError, RunFilter, RunRetrieval, RunStatus, RunsGateway, WorkflowRun, parse_since,
};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
