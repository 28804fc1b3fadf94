//! Mock Actions API that serves a fixed run history behind GitHub's cap.

use chrono::{DateTime, Utc};
use runsweep::WorkflowRun;
use runsweep::github::models::test_support::{page_slice, runs_page_body};
use wiremock::{Request, Respond, ResponseTemplate};

pub(crate) const RUNS_PATH: &str = "/api/v3/repos/owner/repo/actions/runs";
pub(crate) const NEWEST_RUN_AT: &str = "2026-02-15T00:00:00Z";

/// Answers run listings from `history`, honouring the `created` qualifier
/// and reachable only up to `cap` runs per query.
pub(crate) struct CappedHistory {
    pub(crate) history: Vec<WorkflowRun>,
    pub(crate) cap: usize,
}

impl Respond for CappedHistory {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let parameter = |name: &str| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };
        let page = parameter("page")
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(1);
        let per_page = parameter("per_page")
            .and_then(|raw| raw.parse::<u8>().ok())
            .unwrap_or(30);
        let (since, until) = parameter("created")
            .map(|raw| parse_created(&raw))
            .unwrap_or_default();

        let matching: Vec<WorkflowRun> = self
            .history
            .iter()
            .filter(|run| since.is_none_or(|bound| run.created_at >= bound))
            .filter(|run| until.is_none_or(|bound| run.created_at <= bound))
            .cloned()
            .collect();
        let reachable = matching.get(..matching.len().min(self.cap)).unwrap_or_default();
        let total_count = u64::try_from(matching.len()).expect("run count fits in u64");

        ResponseTemplate::new(200).set_body_json(runs_page_body(
            &page_slice(reachable, page, per_page),
            total_count,
        ))
    }
}

type Bounds = (Option<DateTime<Utc>>, Option<DateTime<Utc>>);

fn parse_created(raw: &str) -> Bounds {
    let timestamp = |value: &str| -> DateTime<Utc> {
        value
            .parse()
            .unwrap_or_else(|error| panic!("invalid created bound {value}: {error}"))
    };
    if let Some((since, until)) = raw.split_once("..") {
        (Some(timestamp(since)), Some(timestamp(until)))
    } else if let Some(since) = raw.strip_prefix(">=") {
        (Some(timestamp(since)), None)
    } else if let Some(until) = raw.strip_prefix("<=") {
        (None, Some(timestamp(until)))
    } else {
        panic!("unsupported created qualifier: {raw}")
    }
}
