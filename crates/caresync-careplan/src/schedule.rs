//! Recurrence schedules for care-plan tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How often a task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
}

/// A recurrence rule anchored at a start instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: DateTime<Utc>,
    pub recurrence: Recurrence,
}

impl Schedule {
    /// A once-daily schedule starting at `start`.
    pub fn daily_from(start: DateTime<Utc>) -> Self {
        Self {
            start,
            recurrence: Recurrence::Daily,
        }
    }

    /// Zero-based ordinal of the occurrence covering `at`.
    ///
    /// Computed from calendar days so two outcomes on the same day map to
    /// the same occurrence and outcomes on different days never collide.
    /// Instants before the schedule start clamp to occurrence 0.
    pub fn occurrence_index(&self, at: DateTime<Utc>) -> u64 {
        match self.recurrence {
            Recurrence::Daily => {
                let days = (at.date_naive() - self.start.date_naive()).num_days();
                days.max(0) as u64
            }
        }
    }
}
