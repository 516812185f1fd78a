//! Sync configuration parsing.
//!
//! Parsed from `caresync.toml`; every field has a default, so an empty file
//! (or no file at all) yields the stock blood-glucose setup.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

fn default_task_id() -> String {
    "bloodGlucose".to_string()
}

fn default_task_title() -> String {
    "Blood Glucose".to_string()
}

fn default_unit() -> String {
    caresync_vitals::GLUCOSE_UNIT.to_string()
}

fn default_lookback_days() -> i64 {
    30
}

/// Configuration for the sync engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Logical id of the care-plan task outcomes are recorded against.
    #[serde(default = "default_task_id")]
    pub task_id: String,

    /// Display title used when the task is first provisioned.
    #[serde(default = "default_task_title")]
    pub task_title: String,

    /// Unit attached to recorded outcome values.
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Fixed lookback window for each sync call, in days.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            task_id: default_task_id(),
            task_title: default_task_title(),
            unit: default_unit(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl SyncConfig {
    /// Parse a configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// The closed sync window ending at `now`.
    pub fn window_ending(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.lookback_days), now)
    }
}
