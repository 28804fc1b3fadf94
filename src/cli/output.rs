//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use chrono::SecondsFormat;
use http::StatusCode;
use runsweep::github::is_rate_limit_body;
use runsweep::{RetrievalError, WorkflowRun};

/// Writes one line per run: creation time, id, title, and link.
pub fn write_runs_text<W: Write>(
    writer: &mut W,
    runs: &[WorkflowRun],
) -> Result<(), RetrievalError> {
    for run in runs {
        let created_at = run.created_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let title = if run.display_title.is_empty() {
            "(no title)"
        } else {
            run.display_title.as_str()
        };
        let url = run.html_url.as_deref().unwrap_or("-");
        writeln!(writer, "{created_at}  #{}  {title}  {url}", run.id)
            .map_err(|error| io_error(&error))?;
    }
    Ok(())
}

/// Writes the runs as a pretty-printed JSON array, keeping every API field.
pub fn write_runs_json<W: Write>(
    writer: &mut W,
    runs: &[WorkflowRun],
) -> Result<(), RetrievalError> {
    serde_json::to_writer_pretty(&mut *writer, runs).map_err(|error| RetrievalError::Io {
        message: error.to_string(),
    })?;
    writeln!(writer).map_err(|error| io_error(&error))
}

/// Suggests how to fix a failed retrieval, when the failure is recognisable.
pub fn remediation(error: &RetrievalError) -> Option<&'static str> {
    match error {
        RetrievalError::Transport { status, body, .. } => match *status {
            StatusCode::UNAUTHORIZED => {
                Some("bad credentials: check that the token is valid and has not expired")
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if is_rate_limit_body(*status, body) =>
            {
                Some("rate limit exceeded: wait for the limit to reset before retrying")
            }
            StatusCode::FORBIDDEN => {
                Some("insufficient permissions: the token needs read access to Actions")
            }
            StatusCode::NOT_FOUND => {
                Some("repository or workflow not found, or the token cannot access it")
            }
            _ => None,
        },
        RetrievalError::MissingToken => {
            Some("pass --token or set RUNSWEEP_TOKEN, GITHUB_TOKEN or GH_TOKEN")
        }
        RetrievalError::Network { .. } => Some("check network connectivity and --api-url"),
        _ => None,
    }
}

/// Writes the error and any remediation hint.
pub fn write_error<W: Write>(writer: &mut W, error: &RetrievalError) -> io::Result<()> {
    writeln!(writer, "error: {error}")?;
    if let Some(hint) = remediation(error) {
        writeln!(writer, "hint: {hint}")?;
    }
    Ok(())
}

/// Converts an I/O error to a [`RetrievalError::Io`].
pub(crate) fn io_error(error: &io::Error) -> RetrievalError {
    RetrievalError::Io {
        message: error.to_string(),
    }
}
