//! Platform boundary for the vital-signs store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::sample::{AuthorizationStatus, MetricSample};

/// Scopes the adapter requests from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeSet {
    pub read: bool,
    pub write: bool,
}

impl Default for ScopeSet {
    fn default() -> Self {
        Self {
            read: true,
            write: true,
        }
    }
}

impl ScopeSet {
    /// True when neither scope is configured.
    pub fn is_empty(&self) -> bool {
        !self.read && !self.write
    }
}

/// Raw access to the platform health repository.
///
/// Implementations persist and query samples for the blood-glucose metric
/// only. Window queries may return samples in any order; the adapter sorts.
#[async_trait]
pub trait HealthBackend: Send + Sync {
    /// Whether the platform has any health data capability.
    fn data_available(&self) -> bool;

    /// Prompt the platform for the given scopes and return the decision.
    async fn request_authorization(&self, scopes: &ScopeSet) -> Result<AuthorizationStatus>;

    async fn save_sample(&self, sample: MetricSample) -> Result<()>;

    /// Samples whose timestamp falls in the closed interval `[from, to]`.
    async fn samples_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>>;

    /// Ask the platform to wake this process when other writers add matching
    /// data. Best-effort: callers must tolerate failure.
    async fn enable_background_delivery(&self) -> Result<()>;
}

// A shared backend can be handed to the adapter while the caller retains a
// handle to it.
#[async_trait]
impl<T: HealthBackend + ?Sized> HealthBackend for Arc<T> {
    fn data_available(&self) -> bool {
        (**self).data_available()
    }

    async fn request_authorization(&self, scopes: &ScopeSet) -> Result<AuthorizationStatus> {
        (**self).request_authorization(scopes).await
    }

    async fn save_sample(&self, sample: MetricSample) -> Result<()> {
        (**self).save_sample(sample).await
    }

    async fn samples_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>> {
        (**self).samples_between(from, to).await
    }

    async fn enable_background_delivery(&self) -> Result<()> {
        (**self).enable_background_delivery().await
    }
}
