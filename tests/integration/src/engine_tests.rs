//! End-to-end sync engine scenarios across both adapters.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

use caresync_careplan::{CarePlanStore, Schedule, Task};
use caresync_core::{SyncConfig, SyncEngine};
use caresync_test_utils::careplan::FakeCarePlanBackend;
use caresync_test_utils::vitals::FakeHealthBackend;
use caresync_vitals::{MetricSample, VitalSignsStore};

type TestEngine = SyncEngine<Arc<FakeHealthBackend>, Arc<FakeCarePlanBackend>>;

fn glucose_task() -> Task {
    Task::new(
        "bloodGlucose",
        "Blood Glucose",
        Schedule::daily_from(Utc::now() - Duration::days(60)),
    )
}

fn engine_with(vitals: Arc<FakeHealthBackend>, care_plan: Arc<FakeCarePlanBackend>) -> TestEngine {
    SyncEngine::new(
        VitalSignsStore::new(vitals),
        CarePlanStore::new(care_plan),
        SyncConfig::default(),
    )
}

/// Two samples in the 30-day window are copied newest-first,
/// the last-sync timestamp is updated, and the engine ends idle.
#[tokio::test]
async fn test_thirty_day_window_scenario() {
    caresync_test_utils::init_tracing();
    let now = Utc::now();
    let t1 = now - Duration::hours(1);
    let t2 = now - Duration::hours(2);
    let vitals = Arc::new(FakeHealthBackend::seeded(vec![
        MetricSample::new(98.5, t2),
        MetricSample::new(125.0, t1),
        // Outside the lookback window, must not be copied.
        MetricSample::new(210.0, now - Duration::days(31)),
    ]));
    let care_plan = Arc::new(FakeCarePlanBackend::seeded(vec![glucose_task()], vec![]));
    let engine = engine_with(vitals, care_plan.clone());
    engine.vitals().request_access().await.unwrap();

    let before = Utc::now();
    let report = engine.sync_vitals_to_care_plan().await.unwrap();

    assert_eq!(report.transferred, 2);
    let outcomes = care_plan.outcomes().await;
    let recorded: Vec<(f64, chrono::DateTime<Utc>)> = outcomes
        .iter()
        .map(|o| (o.values[0].value, o.created_at))
        .collect();
    assert_eq!(recorded, vec![(125.0, t1), (98.5, t2)]);

    let state = engine.state();
    assert!(!state.is_syncing);
    let last = state.last_sync_date.unwrap();
    assert!(last >= before && last <= Utc::now());
}

/// While one sync holds the engine, a second trigger is a silent no-op
/// that touches neither adapter.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_syncs_are_mutually_exclusive() {
    let now = Utc::now();
    let gate = Arc::new(Notify::new());
    let vitals = Arc::new(
        FakeHealthBackend::seeded(vec![
            MetricSample::new(100.0, now - Duration::hours(2)),
            MetricSample::new(101.0, now - Duration::hours(1)),
        ])
        .gated(gate.clone()),
    );
    let care_plan = Arc::new(FakeCarePlanBackend::seeded(vec![glucose_task()], vec![]));
    let engine = Arc::new(engine_with(vitals.clone(), care_plan.clone()));
    engine.vitals().request_access().await.unwrap();

    let background = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.sync_vitals_to_care_plan().await })
    };
    // Wait until the first sync is parked inside the gated read.
    while vitals.queries() == 0 {
        tokio::time::sleep(StdDuration::from_millis(2)).await;
    }
    assert!(engine.state().is_syncing);

    let report = engine.sync_care_plan_to_vitals().await.unwrap();
    assert!(report.skipped_busy);
    assert_eq!(report.transferred, 0);
    assert_eq!(care_plan.outcome_adds(), 0);
    assert_eq!(vitals.queries(), 1);

    gate.notify_one();
    let report = background.await.unwrap().unwrap();
    assert_eq!(report.transferred, 2);
    assert!(!engine.state().is_syncing);
}

/// The k-th write failure aborts the batch, surfaces an error that
/// identifies the failure, and still leaves the engine idle.
#[tokio::test]
async fn test_fail_fast_restores_idle_state() {
    let now = Utc::now();
    let vitals = Arc::new(FakeHealthBackend::seeded(vec![
        MetricSample::new(100.0, now - Duration::hours(3)),
        MetricSample::new(101.0, now - Duration::hours(2)),
        MetricSample::new(102.0, now - Duration::hours(1)),
    ]));
    let care_plan =
        Arc::new(FakeCarePlanBackend::seeded(vec![glucose_task()], vec![]).failing_outcome_at(2));
    let engine = engine_with(vitals, care_plan.clone());
    engine.vitals().request_access().await.unwrap();

    let err = engine.sync_vitals_to_care_plan().await.unwrap_err();
    assert!(err.to_string().contains("injected outcome failure on call 2"));
    assert_eq!(care_plan.outcome_adds(), 2);
    assert_eq!(care_plan.outcomes().await.len(), 1);

    let state = engine.state();
    assert!(!state.is_syncing);
    assert!(state.last_sync_date.is_none());
}

/// Bidirectional sync is idempotent: repeated calls do not duplicate
/// records in either store.
#[tokio::test]
async fn test_repeated_bidirectional_sync_is_stable() {
    let now = Utc::now();
    let vitals = Arc::new(FakeHealthBackend::seeded(vec![
        MetricSample::new(98.5, now - Duration::hours(2)),
        MetricSample::new(125.0, now - Duration::hours(1)),
    ]));
    let care_plan = Arc::new(FakeCarePlanBackend::seeded(vec![glucose_task()], vec![]));
    let engine = engine_with(vitals.clone(), care_plan.clone());
    engine.vitals().request_access().await.unwrap();

    let first = engine.sync_bidirectional().await.unwrap();
    assert_eq!(first.transferred, 2);
    assert_eq!(first.skipped_duplicates, 2);

    let second = engine.sync_bidirectional().await.unwrap();
    assert_eq!(second.transferred, 0);
    assert_eq!(second.skipped_duplicates, 4);

    assert_eq!(vitals.samples().await.len(), 2);
    assert_eq!(care_plan.outcomes().await.len(), 2);
}

/// Background-wake registration is best-effort: a failure is logged and
/// swallowed, never fatal to initialization.
#[tokio::test]
async fn test_initialize_survives_background_wake_failure() {
    caresync_test_utils::init_tracing();
    let vitals = Arc::new(FakeHealthBackend::new().failing_background());
    let care_plan = Arc::new(FakeCarePlanBackend::new());
    let engine = engine_with(vitals, care_plan.clone());

    engine.initialize().await.unwrap();
    assert_eq!(care_plan.tasks().await.len(), 1);
}

/// An error in the first direction aborts the second.
#[tokio::test]
async fn test_bidirectional_stops_after_first_direction_fails() {
    let now = Utc::now();
    let vitals = Arc::new(FakeHealthBackend::seeded(vec![MetricSample::new(
        110.0,
        now - Duration::hours(1),
    )]));
    let care_plan =
        Arc::new(FakeCarePlanBackend::seeded(vec![glucose_task()], vec![]).failing_outcome_at(1));
    let engine = engine_with(vitals.clone(), care_plan);
    engine.vitals().request_access().await.unwrap();

    assert!(engine.sync_bidirectional().await.is_err());
    // The second direction never ran: nothing was written back to vitals.
    assert_eq!(vitals.saves(), 0);
    assert!(!engine.state().is_syncing);
}
