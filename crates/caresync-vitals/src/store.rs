//! Typed adapter over a [`HealthBackend`].

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::{HealthBackend, ScopeSet};
use crate::error::{Error, Result};
use crate::sample::{AuthorizationStatus, MetricSample};

/// Adapter for the vital-signs store.
///
/// Owns the process-wide authorization status for the blood-glucose metric
/// and enforces the "access was requested" precondition on every read and
/// write before touching the backend.
pub struct VitalSignsStore<B> {
    backend: B,
    scopes: ScopeSet,
    status: RwLock<AuthorizationStatus>,
}

impl<B: HealthBackend> VitalSignsStore<B> {
    /// Adapter requesting both read and write scopes.
    pub fn new(backend: B) -> Self {
        Self::with_scopes(backend, ScopeSet::default())
    }

    pub fn with_scopes(backend: B, scopes: ScopeSet) -> Self {
        Self {
            backend,
            scopes,
            status: RwLock::new(AuthorizationStatus::Undetermined),
        }
    }

    /// Current authorization status.
    pub fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Ask the platform for read/write permission on the metric.
    ///
    /// # Errors
    ///
    /// `HealthDataUnavailable` when the platform has no health data
    /// capability; `NoScopesConfigured` when the adapter was built with an
    /// empty scope set. Both are configuration failures, reported before the
    /// user is ever prompted.
    pub async fn request_access(&self) -> Result<AuthorizationStatus> {
        if !self.backend.data_available() {
            return Err(Error::HealthDataUnavailable);
        }
        if self.scopes.is_empty() {
            return Err(Error::NoScopesConfigured {
                metric: "bloodGlucose".to_string(),
            });
        }

        let decision = self.backend.request_authorization(&self.scopes).await?;
        *self.status.write().unwrap_or_else(|e| e.into_inner()) = decision;
        tracing::debug!(status = ?decision, "vital-signs authorization updated");
        Ok(decision)
    }

    // Precondition is "not undetermined", deliberately not "authorized":
    // a denied attempt is passed through for the platform to reject.
    fn ensure_access_requested(&self) -> Result<()> {
        match self.authorization_status() {
            AuthorizationStatus::Undetermined => Err(Error::NotAuthorized),
            _ => Ok(()),
        }
    }

    /// Persist one point-in-time sample.
    pub async fn write(&self, value: f64, at: DateTime<Utc>) -> Result<()> {
        self.write_tagged(value, at, None).await
    }

    /// Persist a sample that records the care-plan outcome it came from.
    pub async fn write_tagged(
        &self,
        value: f64,
        at: DateTime<Utc>,
        source_ref: Option<Uuid>,
    ) -> Result<()> {
        self.ensure_access_requested()?;
        let sample = MetricSample {
            id: Uuid::new_v4(),
            value,
            recorded_at: at,
            source_ref,
        };
        self.backend.save_sample(sample).await
    }

    /// Samples in the closed window `[from, to]`, newest first.
    ///
    /// An empty window yields an empty Vec, not an error.
    pub async fn read(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<MetricSample>> {
        self.ensure_access_requested()?;
        let mut samples = self.backend.samples_between(from, to).await?;
        samples.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(samples)
    }

    /// Register for background wake when other writers add matching data.
    ///
    /// Best-effort: callers must not treat failure as fatal.
    pub async fn enable_background_wake(&self) -> Result<()> {
        self.backend.enable_background_delivery().await
    }
}
