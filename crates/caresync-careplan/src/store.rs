//! Typed adapter over a [`CarePlanBackend`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::CarePlanBackend;
use crate::error::{Error, Result};
use crate::outcome::{Outcome, OutcomeValue};
use crate::schedule::Schedule;
use crate::task::Task;

/// Adapter for the care-plan store.
pub struct CarePlanStore<B> {
    backend: B,
}

impl<B: CarePlanBackend> CarePlanStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Idempotent upsert-by-id: create the task unless one with the same
    /// logical id already exists, in which case this is a logged no-op.
    pub async fn ensure_task_exists(
        &self,
        id: &str,
        title: &str,
        schedule: Schedule,
    ) -> Result<()> {
        match self.backend.add_task(Task::new(id, title, schedule)).await {
            Err(Error::TaskExists { id }) => {
                tracing::debug!(task = %id, "task already provisioned, skipping");
                Ok(())
            }
            other => other,
        }
    }

    /// Stable store uuid for a logical task id.
    pub async fn resolve_task_uuid(&self, id: &str) -> Result<Uuid> {
        self.find_required(id).await.map(|task| task.uuid)
    }

    async fn find_required(&self, id: &str) -> Result<Task> {
        self.backend
            .find_task(id)
            .await?
            .ok_or_else(|| Error::TaskNotFound { id: id.to_string() })
    }

    /// Record a single-value outcome against the occurrence of the task
    /// covering `at`.
    pub async fn record_outcome(
        &self,
        task_id: &str,
        value: f64,
        unit: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        self.record_outcome_tagged(task_id, value, unit, at, None)
            .await
    }

    /// Record an outcome that remembers the vital-signs sample it came from.
    pub async fn record_outcome_tagged(
        &self,
        task_id: &str,
        value: f64,
        unit: &str,
        at: DateTime<Utc>,
        source_ref: Option<Uuid>,
    ) -> Result<()> {
        let task = self.find_required(task_id).await?;
        let outcome = Outcome {
            id: Uuid::new_v4(),
            task: task.uuid,
            occurrence_index: task.schedule.occurrence_index(at),
            values: vec![OutcomeValue {
                value,
                unit: unit.to_string(),
            }],
            created_at: at,
            source_ref,
        };
        self.backend.add_outcome(outcome).await
    }

    /// Outcomes created in the closed window `[from, to]`.
    pub async fn query_outcomes(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Outcome>> {
        self.backend.outcomes_between(from, to).await
    }
}
