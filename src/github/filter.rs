//! Query filters applied to workflow run listings.
//!
//! A [`RunFilter`] is fixed for the lifetime of one retrieval. Only the
//! [`CreatedRange`] changes while the retrieval narrows its time window.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use super::error::RetrievalError;
use super::locator::WorkflowId;

/// Run status or conclusion accepted by the `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Run finished, whatever the conclusion.
    Completed,
    /// Run is waiting for a manual action.
    ActionRequired,
    /// Run was cancelled.
    Cancelled,
    /// Run failed.
    Failure,
    /// Run finished with a neutral conclusion.
    Neutral,
    /// Run was skipped.
    Skipped,
    /// Run went stale.
    Stale,
    /// Run succeeded.
    Success,
    /// Run timed out.
    TimedOut,
    /// Run is executing.
    InProgress,
    /// Run is queued.
    Queued,
    /// Run has been requested.
    Requested,
    /// Run is waiting on a deployment protection rule.
    Waiting,
    /// Run is pending.
    Pending,
}

impl RunStatus {
    const ALL: [Self; 14] = [
        Self::Completed,
        Self::ActionRequired,
        Self::Cancelled,
        Self::Failure,
        Self::Neutral,
        Self::Skipped,
        Self::Stale,
        Self::Success,
        Self::TimedOut,
        Self::InProgress,
        Self::Queued,
        Self::Requested,
        Self::Waiting,
        Self::Pending,
    ];

    /// Returns the API parameter value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::ActionRequired => "action_required",
            Self::Cancelled => "cancelled",
            Self::Failure => "failure",
            Self::Neutral => "neutral",
            Self::Skipped => "skipped",
            Self::Stale => "stale",
            Self::Success => "success",
            Self::TimedOut => "timed_out",
            Self::InProgress => "in_progress",
            Self::Queued => "queued",
            Self::Requested => "requested",
            Self::Waiting => "waiting",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = RetrievalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalised)
            .ok_or_else(|| RetrievalError::InvalidStatus {
                value: value.to_owned(),
            })
    }
}

/// Fixed constraints for one retrieval. All set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    /// Only runs for this branch.
    pub branch: Option<String>,
    /// Only runs with this status or conclusion.
    pub status: Option<RunStatus>,
    /// Only runs of this workflow.
    pub workflow_id: Option<WorkflowId>,
}

/// Creation-time bounds of one query window. Both bounds are inclusive, as
/// GitHub's `created` qualifier is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatedRange {
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
}

impl CreatedRange {
    /// Creates a range from optional lower and upper bounds.
    #[must_use]
    pub const fn new(since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Self {
        Self { since, until }
    }

    /// Lower bound, if any.
    #[must_use]
    pub const fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    /// Upper bound, if any.
    #[must_use]
    pub const fn until(&self) -> Option<DateTime<Utc>> {
        self.until
    }

    /// Encodes the range as a `created` qualifier.
    ///
    /// Returns `None` for an unbounded range.
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        match (self.since, self.until) {
            (Some(since), Some(until)) => Some(format!(
                "{}..{}",
                format_timestamp(since),
                format_timestamp(until)
            )),
            (Some(since), None) => Some(format!(">={}", format_timestamp(since))),
            (None, Some(until)) => Some(format!("<={}", format_timestamp(until))),
            (None, None) => None,
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
