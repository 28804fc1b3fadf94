//! Runsweep CLI entrypoint for complete workflow run listing.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use runsweep::{RetrievalError, RunsweepConfig};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = io::stderr().lock();
            if cli::output::write_error(&mut stderr, &error).is_err() {
                return ExitCode::FAILURE;
            }
            if stderr.flush().is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RetrievalError> {
    let config = load_config()?;
    cli::list_runs::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RetrievalError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RunsweepConfig, RetrievalError> {
    RunsweepConfig::load().map_err(|error| RetrievalError::Configuration {
        message: error.to_string(),
    })
}
