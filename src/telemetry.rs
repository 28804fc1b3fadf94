//! Retrieval telemetry events and sinks.
//!
//! The retrieval engine reports what it is doing through an injected
//! [`TelemetrySink`] rather than a process-wide debug switch, so concurrent
//! retrievals (and tests) never observe each other's diagnostics.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::retrieval::Termination;

/// A structured telemetry event emitted during a retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// One page of a window was fetched.
    PageFetched {
        /// 1-based window index.
        window: u32,
        /// 1-based page number within the window.
        page: u32,
        /// Runs returned on the page.
        runs: usize,
        /// `total_count` reported with the page.
        total_count: u64,
    },
    /// A window finished paginating.
    WindowCompleted {
        /// 1-based window index.
        window: u32,
        /// Pages requested for the window.
        pages: u32,
        /// Runs not seen in earlier windows.
        new_runs: usize,
        /// Runs already seen in earlier windows.
        duplicates: usize,
        /// Largest `total_count` reported during the window.
        total_count: u64,
    },
    /// The window was saturated and the next one ends earlier.
    WindowSlid {
        /// Index of the window that was saturated.
        window: u32,
        /// Upper creation-time bound of the next window.
        until: DateTime<Utc>,
    },
    /// The retrieval stopped.
    RetrievalFinished {
        /// Windows queried.
        windows: u32,
        /// Unique runs returned.
        runs: usize,
        /// Why the retrieval stopped.
        termination: Termination,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
