//! Task definitions in the care-plan store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::Schedule;

/// A recurring scheduled activity.
///
/// `id` is the stable logical key (e.g. "bloodGlucose"); `uuid` is assigned
/// by the store and stable once the task is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub uuid: Uuid,
    pub title: String,
    pub schedule: Schedule,
}

impl Task {
    /// Build a task with a fresh store uuid.
    pub fn new(id: impl Into<String>, title: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            id: id.into(),
            uuid: Uuid::new_v4(),
            title: title.into(),
            schedule,
        }
    }
}
