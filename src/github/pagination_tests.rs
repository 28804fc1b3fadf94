//! Unit tests for window pagination.

use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};

use super::{RunAccumulator, WindowFetcher, WindowOutcome};
use crate::github::error::RetrievalError;
use crate::github::filter::{CreatedRange, RunFilter};
use crate::github::gateway::{MockRunsGateway, RunsGateway};
use crate::github::locator::RepositoryLocator;
use crate::github::models::RunsPage;
use crate::github::models::test_support::{
    SimulatedRunsGateway, page_slice, run_at, run_history,
};
use crate::telemetry::NoopTelemetrySink;

#[fixture]
fn locator() -> RepositoryLocator {
    RepositoryLocator::from_owner_repo("owner", "repo").expect("locator should be valid")
}

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("timestamp should parse")
}

async fn fetch_window<G: RunsGateway>(
    gateway: &G,
    locator: &RepositoryLocator,
    created: CreatedRange,
    accumulator: &mut RunAccumulator,
    progress: &mut Vec<(usize, u64)>,
) -> Result<WindowOutcome, RetrievalError> {
    let filter = RunFilter::default();
    let fetcher = WindowFetcher {
        gateway,
        locator,
        filter: &filter,
        telemetry: &NoopTelemetrySink,
    };
    let mut observer = |fetched: usize, total: u64| progress.push((fetched, total));
    fetcher.fetch(1, created, accumulator, &mut observer).await
}

#[rstest]
#[tokio::test]
async fn walks_pages_until_a_short_page(locator: RepositoryLocator) {
    let gateway = SimulatedRunsGateway::new(run_history(250, "2026-02-15T00:00:00Z", 60));
    let mut accumulator = RunAccumulator::default();
    let mut progress = Vec::new();

    let outcome = fetch_window(
        &gateway,
        &locator,
        CreatedRange::default(),
        &mut accumulator,
        &mut progress,
    )
    .await
    .expect("window should be fetched");

    assert_eq!(
        outcome,
        WindowOutcome {
            pages: 3,
            new_runs: 250,
            duplicates: 0,
            total_count: 250,
            reached_lower_bound: false,
        }
    );
    let pages: Vec<u32> = gateway.queries().iter().map(|query| query.page).collect();
    assert_eq!(pages, vec![1, 2, 3]);
    assert_eq!(progress, vec![(100, 250), (200, 250), (250, 250)]);
}

#[rstest]
#[tokio::test]
async fn short_page_ends_window_regardless_of_total_count(locator: RepositoryLocator) {
    let history = run_history(140, "2026-02-15T00:00:00Z", 60);
    let mut gateway = MockRunsGateway::new();
    gateway
        .expect_list_runs()
        .times(2)
        .returning(move |_, query| {
            Ok(RunsPage {
                runs: page_slice(&history, query.page, query.per_page),
                total_count: 5000,
            })
        });
    let mut accumulator = RunAccumulator::default();

    let outcome = fetch_window(
        &gateway,
        &locator,
        CreatedRange::default(),
        &mut accumulator,
        &mut Vec::new(),
    )
    .await
    .expect("window should be fetched");

    assert_eq!(outcome.pages, 2);
    assert_eq!(outcome.new_runs, 140);
    assert_eq!(outcome.total_count, 5000);
}

#[rstest]
#[tokio::test]
async fn stops_mid_page_at_the_lower_bound(locator: RepositoryLocator) {
    let mut gateway = MockRunsGateway::new();
    gateway
        .expect_list_runs()
        .withf(|_, query| query.page == 1)
        .times(1)
        .returning(|_, _| {
            Ok(RunsPage {
                runs: vec![
                    run_at(2, "2026-02-15T00:00:00Z"),
                    run_at(1, "2026-01-01T00:00:00Z"),
                ],
                total_count: 2,
            })
        });
    let mut accumulator = RunAccumulator::default();

    let outcome = fetch_window(
        &gateway,
        &locator,
        CreatedRange::new(Some(at("2026-02-01T00:00:00Z")), None),
        &mut accumulator,
        &mut Vec::new(),
    )
    .await
    .expect("window should be fetched");

    assert!(outcome.reached_lower_bound);
    let ids: Vec<u64> = accumulator.into_runs().iter().map(|run| run.id).collect();
    assert_eq!(ids, vec![2]);
}

#[rstest]
#[tokio::test]
async fn lower_bound_on_a_full_page_stops_pagination(locator: RepositoryLocator) {
    // One run per hour: the 51st run is 50 hours old.
    let history = run_history(300, "2026-02-15T00:00:00Z", 3600);
    let mut gateway = MockRunsGateway::new();
    gateway
        .expect_list_runs()
        .times(1)
        .returning(move |_, query| {
            Ok(RunsPage {
                runs: page_slice(&history, query.page, query.per_page),
                total_count: 300,
            })
        });
    let mut accumulator = RunAccumulator::default();

    let outcome = fetch_window(
        &gateway,
        &locator,
        CreatedRange::new(Some(at("2026-02-12T22:00:00Z")), None),
        &mut accumulator,
        &mut Vec::new(),
    )
    .await
    .expect("window should be fetched");

    assert!(outcome.reached_lower_bound);
    assert_eq!(outcome.new_runs, 51);
    assert!(
        accumulator
            .into_runs()
            .iter()
            .all(|run| run.created_at >= at("2026-02-12T22:00:00Z")),
        "no run may precede the lower bound"
    );
}

#[rstest]
#[tokio::test]
async fn keeps_the_largest_total_count_reported(locator: RepositoryLocator) {
    let history = run_history(250, "2026-02-15T00:00:00Z", 60);
    let mut gateway = MockRunsGateway::new();
    gateway.expect_list_runs().times(3).returning(move |_, query| {
        let total_count = match query.page {
            1 => 1000,
            2 => 1010,
            _ => 990,
        };
        Ok(RunsPage {
            runs: page_slice(&history, query.page, query.per_page),
            total_count,
        })
    });
    let mut accumulator = RunAccumulator::default();
    let mut progress = Vec::new();

    let outcome = fetch_window(
        &gateway,
        &locator,
        CreatedRange::default(),
        &mut accumulator,
        &mut progress,
    )
    .await
    .expect("window should be fetched");

    assert_eq!(outcome.total_count, 1010);
    assert_eq!(progress, vec![(100, 1000), (200, 1010), (250, 1010)]);
}

#[rstest]
#[tokio::test]
async fn counts_runs_already_collected_as_duplicates(locator: RepositoryLocator) {
    let gateway = SimulatedRunsGateway::new(run_history(30, "2026-02-15T00:00:00Z", 60));
    let mut accumulator = RunAccumulator::default();
    for id in 1..=10 {
        accumulator.insert(run_at(id, "2026-01-01T00:00:00Z"));
    }

    let outcome = fetch_window(
        &gateway,
        &locator,
        CreatedRange::default(),
        &mut accumulator,
        &mut Vec::new(),
    )
    .await
    .expect("window should be fetched");

    assert_eq!(outcome.new_runs, 20);
    assert_eq!(outcome.duplicates, 10);
    assert_eq!(accumulator.len(), 30);
}

#[rstest]
#[tokio::test]
async fn propagates_gateway_failures(locator: RepositoryLocator) {
    let mut gateway = MockRunsGateway::new();
    gateway.expect_list_runs().times(1).returning(|_, _| {
        Err(RetrievalError::Network {
            message: "connection reset".to_owned(),
        })
    });

    let result = fetch_window(
        &gateway,
        &locator,
        CreatedRange::default(),
        &mut RunAccumulator::default(),
        &mut Vec::new(),
    )
    .await;

    assert!(
        matches!(result, Err(RetrievalError::Network { .. })),
        "expected Network, got {result:?}"
    );
}

#[test]
fn accumulator_sorts_newest_first_and_finds_oldest() {
    let mut accumulator = RunAccumulator::default();
    accumulator.insert(run_at(1, "2026-01-01T00:00:00Z"));
    accumulator.insert(run_at(3, "2026-03-01T00:00:00Z"));
    accumulator.insert(run_at(2, "2026-02-01T00:00:00Z"));
    assert!(!accumulator.insert(run_at(3, "2026-03-01T00:00:00Z")));

    accumulator.sort_newest_first();

    assert_eq!(
        accumulator.oldest_created_at(),
        Some(at("2026-01-01T00:00:00Z"))
    );
    let ids: Vec<u64> = accumulator.into_runs().iter().map(|run| run.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}
