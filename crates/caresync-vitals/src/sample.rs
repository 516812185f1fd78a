//! Sample and authorization types for the vital-signs store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unit for blood-glucose samples. The adapter handles exactly one metric
/// and exposes no unit conversion.
pub const GLUCOSE_UNIT: &str = "mg/dL";

/// Authorization state of the adapter against the platform store.
///
/// `Undetermined` transitions to `Authorized` or `Denied` when access is
/// requested; both are terminal from the adapter's perspective. Read/write
/// preconditions check "not undetermined" rather than "authorized": a denied
/// status still permits an attempt, which the platform rejects at a lower
/// layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    #[default]
    Undetermined,
    Authorized,
    Denied,
}

/// One blood-glucose measurement. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Origin id, unique within the vital-signs store.
    pub id: Uuid,
    /// Measured value in mg/dL.
    pub value: f64,
    /// Point-in-time timestamp (sample start == end).
    pub recorded_at: DateTime<Utc>,
    /// Care-plan outcome this sample was synced from, if any. This is the
    /// duplicate-suppression key for bidirectional sync.
    pub source_ref: Option<Uuid>,
}

impl MetricSample {
    /// Build a new sample with a fresh origin id.
    pub fn new(value: f64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            recorded_at,
            source_ref: None,
        }
    }

    /// Build a sample that records the care-plan outcome it was synced from.
    pub fn from_outcome(value: f64, recorded_at: DateTime<Utc>, outcome: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            recorded_at,
            source_ref: Some(outcome),
        }
    }
}
