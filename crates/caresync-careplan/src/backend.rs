//! Storage boundary for the care-plan store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::outcome::Outcome;
use crate::task::Task;

/// Raw access to the task/outcome tracker.
///
/// Implementations own the "one task per logical id" invariant: `add_task`
/// must fail with [`Error::TaskExists`](crate::Error::TaskExists) — a
/// structured kind, never a message to string-match — when the id is taken.
#[async_trait]
pub trait CarePlanBackend: Send + Sync {
    async fn add_task(&self, task: Task) -> Result<()>;

    /// Point-in-time lookup by logical id.
    async fn find_task(&self, id: &str) -> Result<Option<Task>>;

    async fn add_outcome(&self, outcome: Outcome) -> Result<()>;

    /// Outcomes whose creation time falls in the closed interval `[from, to]`.
    async fn outcomes_between(&self, from: DateTime<Utc>, to: DateTime<Utc>)
    -> Result<Vec<Outcome>>;
}

// A shared backend can be handed to the adapter while the caller retains a
// handle to it.
#[async_trait]
impl<T: CarePlanBackend + ?Sized> CarePlanBackend for Arc<T> {
    async fn add_task(&self, task: Task) -> Result<()> {
        (**self).add_task(task).await
    }

    async fn find_task(&self, id: &str) -> Result<Option<Task>> {
        (**self).find_task(id).await
    }

    async fn add_outcome(&self, outcome: Outcome) -> Result<()> {
        (**self).add_outcome(outcome).await
    }

    async fn outcomes_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Outcome>> {
        (**self).outcomes_between(from, to).await
    }
}
