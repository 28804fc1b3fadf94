//! Workflow run listing operation.

use std::io::{self, Write};

use runsweep::{
    NoopTelemetrySink, OctocrabRunsGateway, PersonalAccessToken, ProgressObserver,
    RepositoryLocator, RetrievalError, RunRetrieval, RunsGateway, RunsweepConfig,
    StderrJsonlTelemetrySink, TelemetrySink, WorkflowRun,
};

use super::output::{write_runs_json, write_runs_text};
use super::progress::RunProgress;

/// Retrieves every matching run for the configured repository and prints it
/// to stdout.
///
/// # Errors
///
/// Returns [`RetrievalError::Configuration`] if required configuration is
/// missing, or the retrieval error that aborted the listing.
pub async fn run(config: &RunsweepConfig) -> Result<(), RetrievalError> {
    let mut stdout = io::stdout().lock();
    let mut progress = RunProgress::for_stderr();
    let result = run_with_gateway_builder(
        config,
        OctocrabRunsGateway::for_token,
        &mut stdout,
        &mut progress,
    )
    .await;
    progress.finish();
    result
}

/// Lists runs using a custom gateway builder.
///
/// This function is exposed for testing with mock gateways.
pub async fn run_with_gateway_builder<G, F, W, P>(
    config: &RunsweepConfig,
    build_gateway: F,
    writer: &mut W,
    progress: &mut P,
) -> Result<(), RetrievalError>
where
    G: RunsGateway,
    F: FnOnce(&PersonalAccessToken, &RepositoryLocator) -> Result<G, RetrievalError>,
    W: Write,
    P: ProgressObserver,
{
    let locator = config.repository_locator()?;
    let filter = config.run_filter()?;
    let since = config.since()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;

    let gateway = build_gateway(&token, &locator)?;
    let telemetry: &dyn TelemetrySink = if config.debug {
        &StderrJsonlTelemetrySink
    } else {
        &NoopTelemetrySink
    };

    let runs = RunRetrieval::new(&gateway)
        .with_telemetry(telemetry)
        .retrieve(&locator, &filter, since, progress)
        .await?;
    let matching = filter_by_title(runs, config.title_filter.as_deref());

    if config.json {
        write_runs_json(writer, &matching)
    } else {
        write_runs_text(writer, &matching)
    }
}

/// Keeps runs whose title contains `needle`, ignoring case.
fn filter_by_title(runs: Vec<WorkflowRun>, needle: Option<&str>) -> Vec<WorkflowRun> {
    let Some(raw_needle) = needle else {
        return runs;
    };
    let lowered = raw_needle.to_lowercase();
    runs.into_iter()
        .filter(|run| run.display_title.to_lowercase().contains(&lowered))
        .collect()
}
