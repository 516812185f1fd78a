//! Bidirectional sync engine.
//!
//! Moves blood-glucose records between the vital-signs store and the
//! care-plan store over a fixed lookback window, under an engine-wide
//! re-entrancy guard. Concurrent triggers are skipped, not queued; within
//! one direction writes are issued sequentially in read order and the first
//! error aborts the remainder (fail-fast, no rollback of earlier writes).

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;

use caresync_careplan::{CarePlanBackend, CarePlanStore, Schedule};
use caresync_vitals::{HealthBackend, VitalSignsStore};

use crate::Result;
use crate::config::SyncConfig;
use crate::state::{SyncState, SyncStatePublisher};

/// Result of one sync call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Records written to the destination store.
    pub transferred: usize,
    /// Source records recognized as already present in the destination.
    pub skipped_duplicates: usize,
    /// Outcomes with an empty values sequence (care-plan → vitals only).
    pub skipped_empty: usize,
    /// True when the call was a no-op because a sync was already in flight.
    pub skipped_busy: bool,
}

impl SyncReport {
    fn busy() -> Self {
        Self {
            skipped_busy: true,
            ..Self::default()
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.transferred += other.transferred;
        self.skipped_duplicates += other.skipped_duplicates;
        self.skipped_empty += other.skipped_empty;
        self
    }
}

/// Orchestrates bidirectional transfer between the two stores.
///
/// The adapters are injected at construction and owned by the engine; state
/// is observable through [`state`](Self::state) and
/// [`subscribe`](Self::subscribe).
pub struct SyncEngine<H, C> {
    vitals: VitalSignsStore<H>,
    care_plan: CarePlanStore<C>,
    config: SyncConfig,
    state: SyncStatePublisher,
    in_flight: AtomicBool,
}

impl<H: HealthBackend, C: CarePlanBackend> SyncEngine<H, C> {
    pub fn new(
        vitals: VitalSignsStore<H>,
        care_plan: CarePlanStore<C>,
        config: SyncConfig,
    ) -> Self {
        Self {
            vitals,
            care_plan,
            config,
            state: SyncStatePublisher::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current sync status snapshot.
    pub fn state(&self) -> SyncState {
        self.state.current()
    }

    /// Receiver that wakes on every status change.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn vitals(&self) -> &VitalSignsStore<H> {
        &self.vitals
    }

    pub fn care_plan(&self) -> &CarePlanStore<C> {
        &self.care_plan
    }

    /// One-time setup the caller awaits explicitly: request vital-signs
    /// access, provision the care-plan task idempotently, then register for
    /// background wake. Wake registration is best-effort and never fatal.
    pub async fn initialize(&self) -> Result<()> {
        self.vitals.request_access().await?;
        self.care_plan
            .ensure_task_exists(
                &self.config.task_id,
                &self.config.task_title,
                Schedule::daily_from(Utc::now()),
            )
            .await?;
        if let Err(err) = self.vitals.enable_background_wake().await {
            tracing::warn!(error = %err, "background wake registration failed, continuing without it");
        }
        Ok(())
    }

    // Atomic check-and-set entry guard: two near-simultaneous triggers can
    // never both observe an idle engine.
    fn begin(&self) -> Option<SyncPass<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.state.set_syncing(true);
        Some(SyncPass {
            flag: &self.in_flight,
            state: &self.state,
        })
    }

    /// Copy window samples from the vital-signs store into the care plan.
    ///
    /// Returns immediately with a busy report if a sync is already in
    /// flight. On success `last_sync_date` is updated; `is_syncing` is
    /// cleared on every exit path.
    pub async fn sync_vitals_to_care_plan(&self) -> Result<SyncReport> {
        let Some(_pass) = self.begin() else {
            tracing::debug!("sync already in flight, skipping vitals → care-plan");
            return Ok(SyncReport::busy());
        };

        let report = self.run_vitals_to_care_plan().await?;
        self.state.mark_synced(Utc::now());
        tracing::info!(
            transferred = report.transferred,
            skipped = report.skipped_duplicates,
            "vitals → care-plan sync complete"
        );
        Ok(report)
    }

    async fn run_vitals_to_care_plan(&self) -> Result<SyncReport> {
        let (from, to) = self.config.window_ending(Utc::now());
        let samples = self.vitals.read(from, to).await?;
        let existing = self.care_plan.query_outcomes(from, to).await?;

        let mut report = SyncReport::default();
        for sample in samples {
            let duplicate = existing.iter().any(|o| o.source_ref == Some(sample.id))
                || sample
                    .source_ref
                    .is_some_and(|r| existing.iter().any(|o| o.id == r));
            if duplicate {
                tracing::debug!(sample = %sample.id, "sample already recorded in care plan, skipping");
                report.skipped_duplicates += 1;
                continue;
            }
            // Fail-fast: an error here aborts the remaining samples. Earlier
            // writes are not rolled back.
            self.care_plan
                .record_outcome_tagged(
                    &self.config.task_id,
                    sample.value,
                    &self.config.unit,
                    sample.recorded_at,
                    Some(sample.id),
                )
                .await?;
            report.transferred += 1;
        }
        Ok(report)
    }

    /// Copy window outcomes from the care plan into the vital-signs store.
    ///
    /// Only the first value of each outcome is written; outcomes with an
    /// empty values sequence are skipped. The outcome's creation timestamp
    /// becomes the sample timestamp.
    pub async fn sync_care_plan_to_vitals(&self) -> Result<SyncReport> {
        let Some(_pass) = self.begin() else {
            tracing::debug!("sync already in flight, skipping care-plan → vitals");
            return Ok(SyncReport::busy());
        };

        let report = self.run_care_plan_to_vitals().await?;
        self.state.mark_synced(Utc::now());
        tracing::info!(
            transferred = report.transferred,
            skipped = report.skipped_duplicates,
            "care-plan → vitals sync complete"
        );
        Ok(report)
    }

    async fn run_care_plan_to_vitals(&self) -> Result<SyncReport> {
        let (from, to) = self.config.window_ending(Utc::now());
        let outcomes = self.care_plan.query_outcomes(from, to).await?;
        let existing = self.vitals.read(from, to).await?;

        let mut report = SyncReport::default();
        for outcome in outcomes {
            let Some(first) = outcome.first_value() else {
                tracing::debug!(outcome = %outcome.id, "outcome has no values, skipping");
                report.skipped_empty += 1;
                continue;
            };
            let duplicate = existing.iter().any(|s| s.source_ref == Some(outcome.id))
                || outcome
                    .source_ref
                    .is_some_and(|r| existing.iter().any(|s| s.id == r));
            if duplicate {
                tracing::debug!(outcome = %outcome.id, "outcome already present in vital signs, skipping");
                report.skipped_duplicates += 1;
                continue;
            }
            self.vitals
                .write_tagged(first.value, outcome.created_at, Some(outcome.id))
                .await?;
            report.transferred += 1;
        }
        Ok(report)
    }

    /// Both directions in sequence: vitals → care-plan, then care-plan →
    /// vitals. An error in the first direction aborts the second. With the
    /// `source_ref` cross-references in place a value round-tripped within
    /// one call is recognized and not re-written to its original store.
    pub async fn sync_bidirectional(&self) -> Result<SyncReport> {
        let first = self.sync_vitals_to_care_plan().await?;
        if first.skipped_busy {
            return Ok(first);
        }
        let second = self.sync_care_plan_to_vitals().await?;
        Ok(first.merge(second))
    }
}

/// Clears the in-flight flag and publishes the idle state on every exit
/// path, including error returns.
struct SyncPass<'a> {
    flag: &'a AtomicBool,
    state: &'a SyncStatePublisher,
}

impl Drop for SyncPass<'_> {
    fn drop(&mut self) {
        self.state.set_syncing(false);
        self.flag.store(false, Ordering::Release);
    }
}
