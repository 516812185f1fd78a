//! In-process care-plan backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::Result;
use crate::backend::CarePlanBackend;
use crate::error::Error;
use crate::outcome::Outcome;
use crate::task::Task;

/// In-memory [`CarePlanBackend`] for local runs and tests.
#[derive(Default)]
pub struct MemoryCarePlanBackend {
    tasks: RwLock<Vec<Task>>,
    outcomes: RwLock<Vec<Outcome>>,
}

impl MemoryCarePlanBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with tasks and outcomes.
    pub fn with_data(tasks: Vec<Task>, outcomes: Vec<Outcome>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
            outcomes: RwLock::new(outcomes),
        }
    }

    /// Snapshot of all tasks.
    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Snapshot of all outcomes, in insertion order.
    pub async fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.read().await.clone()
    }
}

#[async_trait]
impl CarePlanBackend for MemoryCarePlanBackend {
    async fn add_task(&self, task: Task) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(Error::TaskExists { id: task.id });
        }
        tasks.push(task);
        Ok(())
    }

    async fn find_task(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.tasks.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn add_outcome(&self, outcome: Outcome) -> Result<()> {
        self.outcomes.write().await.push(outcome);
        Ok(())
    }

    async fn outcomes_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Outcome>> {
        let outcomes = self.outcomes.read().await;
        Ok(outcomes
            .iter()
            .filter(|o| o.created_at >= from && o.created_at <= to)
            .cloned()
            .collect())
    }
}
