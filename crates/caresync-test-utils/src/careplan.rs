//! Instrumented fake over the in-memory care-plan backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use caresync_careplan::{
    CarePlanBackend, Error, MemoryCarePlanBackend, Outcome, Result, Task,
};

/// [`CarePlanBackend`] wrapper that counts calls and can fail a chosen
/// outcome write.
pub struct FakeCarePlanBackend {
    inner: MemoryCarePlanBackend,
    task_adds: AtomicUsize,
    outcome_adds: AtomicUsize,
    /// 1-based index of the outcome write that fails, if any.
    fail_outcome_at: Option<usize>,
}

impl FakeCarePlanBackend {
    pub fn new() -> Self {
        Self::seeded(Vec::new(), Vec::new())
    }

    /// Fake pre-seeded with tasks and outcomes.
    pub fn seeded(tasks: Vec<Task>, outcomes: Vec<Outcome>) -> Self {
        Self {
            inner: MemoryCarePlanBackend::with_data(tasks, outcomes),
            task_adds: AtomicUsize::new(0),
            outcome_adds: AtomicUsize::new(0),
            fail_outcome_at: None,
        }
    }

    /// Fail the `n`-th outcome write (1-based) with a store error.
    pub fn failing_outcome_at(mut self, n: usize) -> Self {
        self.fail_outcome_at = Some(n);
        self
    }

    /// Number of task creations attempted so far.
    pub fn task_adds(&self) -> usize {
        self.task_adds.load(Ordering::SeqCst)
    }

    /// Number of outcome writes attempted so far.
    pub fn outcome_adds(&self) -> usize {
        self.outcome_adds.load(Ordering::SeqCst)
    }

    /// Snapshot of stored tasks.
    pub async fn tasks(&self) -> Vec<Task> {
        self.inner.tasks().await
    }

    /// Snapshot of stored outcomes, in insertion order.
    pub async fn outcomes(&self) -> Vec<Outcome> {
        self.inner.outcomes().await
    }
}

impl Default for FakeCarePlanBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarePlanBackend for FakeCarePlanBackend {
    async fn add_task(&self, task: Task) -> Result<()> {
        self.task_adds.fetch_add(1, Ordering::SeqCst);
        self.inner.add_task(task).await
    }

    async fn find_task(&self, id: &str) -> Result<Option<Task>> {
        self.inner.find_task(id).await
    }

    async fn add_outcome(&self, outcome: Outcome) -> Result<()> {
        let call = self.outcome_adds.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_outcome_at == Some(call) {
            return Err(Error::Store {
                message: format!("injected outcome failure on call {call}"),
            });
        }
        self.inner.add_outcome(outcome).await
    }

    async fn outcomes_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Outcome>> {
        self.inner.outcomes_between(from, to).await
    }
}
