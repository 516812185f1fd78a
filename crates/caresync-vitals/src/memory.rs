//! In-process health backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::Result;
use crate::backend::{HealthBackend, ScopeSet};
use crate::sample::{AuthorizationStatus, MetricSample};

/// In-memory [`HealthBackend`] for local runs and tests.
///
/// Availability and the authorization decision are fixed at construction so
/// the adapter's error paths can be exercised without a real platform.
pub struct MemoryHealthBackend {
    samples: RwLock<Vec<MetricSample>>,
    available: bool,
    grant: AuthorizationStatus,
}

impl MemoryHealthBackend {
    /// An available backend that grants authorization when prompted.
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(Vec::new()),
            available: true,
            grant: AuthorizationStatus::Authorized,
        }
    }

    /// Backend pre-seeded with samples.
    pub fn with_samples(samples: Vec<MetricSample>) -> Self {
        Self {
            samples: RwLock::new(samples),
            ..Self::new()
        }
    }

    /// Backend that reports no health data capability.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Backend whose authorization prompt resolves to `decision`.
    pub fn with_grant(decision: AuthorizationStatus) -> Self {
        Self {
            grant: decision,
            ..Self::new()
        }
    }

    /// Snapshot of all stored samples, in insertion order.
    pub async fn samples(&self) -> Vec<MetricSample> {
        self.samples.read().await.clone()
    }
}

impl Default for MemoryHealthBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthBackend for MemoryHealthBackend {
    fn data_available(&self) -> bool {
        self.available
    }

    async fn request_authorization(&self, _scopes: &ScopeSet) -> Result<AuthorizationStatus> {
        Ok(self.grant)
    }

    async fn save_sample(&self, sample: MetricSample) -> Result<()> {
        self.samples.write().await.push(sample);
        Ok(())
    }

    async fn samples_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>> {
        let samples = self.samples.read().await;
        Ok(samples
            .iter()
            .filter(|s| s.recorded_at >= from && s.recorded_at <= to)
            .cloned()
            .collect())
    }

    async fn enable_background_delivery(&self) -> Result<()> {
        Ok(())
    }
}
