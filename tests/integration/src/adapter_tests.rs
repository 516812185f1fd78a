//! Adapter-level scenarios against the in-memory backends.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;

use caresync_careplan::{CarePlanStore, Error as CarePlanError, MemoryCarePlanBackend, Schedule};
use caresync_test_utils::vitals::FakeHealthBackend;
use caresync_vitals::{
    AuthorizationStatus, Error as VitalsError, MemoryHealthBackend, MetricSample, ScopeSet,
    VitalSignsStore,
};

/// With authorization still undetermined, reads and writes
/// fail without the underlying store ever being contacted.
#[tokio::test]
async fn test_undetermined_authorization_short_circuits() {
    let backend = Arc::new(FakeHealthBackend::new());
    let store = VitalSignsStore::new(backend.clone());
    let now = Utc::now();

    assert!(matches!(
        store.write(120.0, now).await,
        Err(VitalsError::NotAuthorized)
    ));
    assert!(matches!(
        store.read(now - Duration::days(30), now).await,
        Err(VitalsError::NotAuthorized)
    ));
    assert_eq!(backend.saves(), 0);
    assert_eq!(backend.queries(), 0);
}

#[tokio::test]
async fn test_request_access_configuration_failures() {
    let unavailable = VitalSignsStore::new(MemoryHealthBackend::unavailable());
    assert!(matches!(
        unavailable.request_access().await,
        Err(VitalsError::HealthDataUnavailable)
    ));

    let no_scopes = VitalSignsStore::with_scopes(
        MemoryHealthBackend::new(),
        ScopeSet {
            read: false,
            write: false,
        },
    );
    assert!(matches!(
        no_scopes.request_access().await,
        Err(VitalsError::NoScopesConfigured { .. })
    ));
}

/// A denied decision is terminal but not a precondition failure: the
/// attempt still reaches the platform.
#[tokio::test]
async fn test_denied_authorization_still_reaches_backend() {
    let backend = Arc::new(MemoryHealthBackend::with_grant(AuthorizationStatus::Denied));
    let store = VitalSignsStore::new(backend.clone());

    let status = store.request_access().await.unwrap();
    assert_eq!(status, AuthorizationStatus::Denied);
    assert_eq!(store.authorization_status(), AuthorizationStatus::Denied);

    store.write(107.0, Utc::now()).await.unwrap();
    assert_eq!(backend.samples().await.len(), 1);
}

#[tokio::test]
async fn test_read_sorts_newest_first_across_days() {
    let now = Utc::now();
    let backend = MemoryHealthBackend::with_samples(vec![
        MetricSample::new(90.0, now - Duration::days(3)),
        MetricSample::new(92.0, now - Duration::days(1)),
        MetricSample::new(91.0, now - Duration::days(2)),
    ]);
    let store = VitalSignsStore::new(backend);
    store.request_access().await.unwrap();

    let values: Vec<f64> = store
        .read(now - Duration::days(30), now)
        .await
        .unwrap()
        .iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(values, vec![92.0, 91.0, 90.0]);
}

/// Provisioning an already-existing task is a no-op
/// success, and the stored task keeps its original uuid.
#[tokio::test]
async fn test_task_provisioning_is_idempotent() {
    let backend = Arc::new(MemoryCarePlanBackend::new());
    let store = CarePlanStore::new(backend.clone());
    let schedule = Schedule::daily_from(Utc::now());

    store
        .ensure_task_exists("bloodGlucose", "Blood Glucose", schedule)
        .await
        .unwrap();
    let uuid = store.resolve_task_uuid("bloodGlucose").await.unwrap();

    store
        .ensure_task_exists("bloodGlucose", "Blood Glucose", schedule)
        .await
        .unwrap();

    assert_eq!(backend.tasks().await.len(), 1);
    assert_eq!(store.resolve_task_uuid("bloodGlucose").await.unwrap(), uuid);
}

#[tokio::test]
async fn test_unknown_task_lookup_fails() {
    let store = CarePlanStore::new(MemoryCarePlanBackend::new());
    assert!(matches!(
        store.resolve_task_uuid("bloodGlucose").await,
        Err(CarePlanError::TaskNotFound { .. })
    ));
}

/// Outcomes land on the daily occurrence matching their calendar day, so
/// per-day distinction is preserved.
#[tokio::test]
async fn test_outcomes_map_to_calendar_occurrences() {
    let anchor: DateTime<Utc> = "2026-03-01T06:00:00Z".parse().unwrap();
    let backend = Arc::new(MemoryCarePlanBackend::new());
    let store = CarePlanStore::new(backend.clone());
    store
        .ensure_task_exists("bloodGlucose", "Blood Glucose", Schedule::daily_from(anchor))
        .await
        .unwrap();

    let day10: DateTime<Utc> = "2026-03-11T20:00:00Z".parse().unwrap();
    let day11: DateTime<Utc> = "2026-03-12T07:30:00Z".parse().unwrap();
    store
        .record_outcome("bloodGlucose", 118.0, "mg/dL", day10)
        .await
        .unwrap();
    store
        .record_outcome("bloodGlucose", 104.0, "mg/dL", day10 + Duration::hours(2))
        .await
        .unwrap();
    store
        .record_outcome("bloodGlucose", 96.0, "mg/dL", day11)
        .await
        .unwrap();

    let indices: Vec<u64> = backend
        .outcomes()
        .await
        .iter()
        .map(|o| o.occurrence_index)
        .collect();
    assert_eq!(indices, vec![10, 10, 11]);
}
