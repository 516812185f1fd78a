//! Recorded task outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One measured value inside an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeValue {
    pub value: f64,
    pub unit: String,
}

/// A recorded occurrence of a scheduled task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: Uuid,
    /// Uuid of the task this outcome belongs to.
    pub task: Uuid,
    /// Which occurrence of the recurring task this records.
    pub occurrence_index: u64,
    /// Ordered values; may be empty for outcomes recorded by other writers.
    pub values: Vec<OutcomeValue>,
    pub created_at: DateTime<Utc>,
    /// Vital-signs sample this outcome was synced from, if any. This is the
    /// duplicate-suppression key for bidirectional sync.
    pub source_ref: Option<Uuid>,
}

impl Outcome {
    /// Build a single-value outcome with a fresh id.
    pub fn single(
        task: Uuid,
        occurrence_index: u64,
        value: OutcomeValue,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            task,
            occurrence_index,
            values: vec![value],
            created_at,
            source_ref: None,
        }
    }

    /// The first recorded value, if any.
    pub fn first_value(&self) -> Option<&OutcomeValue> {
        self.values.first()
    }
}
