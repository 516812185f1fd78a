//! Instrumented fake over the in-memory health backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use caresync_vitals::{
    AuthorizationStatus, Error, HealthBackend, MemoryHealthBackend, MetricSample, Result, ScopeSet,
};

/// [`HealthBackend`] wrapper that counts calls, can block reads on a gate,
/// and can fail a chosen save.
///
/// Wrap it in an [`Arc`] and hand a clone to the adapter; the retained
/// handle keeps the counters reachable after the engine takes ownership.
pub struct FakeHealthBackend {
    inner: MemoryHealthBackend,
    saves: AtomicUsize,
    queries: AtomicUsize,
    /// When set, `samples_between` waits on this after counting the call.
    read_gate: Option<Arc<Notify>>,
    /// 1-based index of the save call that fails, if any.
    fail_save_at: Option<usize>,
    fail_background: bool,
}

impl FakeHealthBackend {
    pub fn new() -> Self {
        Self::with_inner(MemoryHealthBackend::new())
    }

    /// Fake pre-seeded with samples.
    pub fn seeded(samples: Vec<MetricSample>) -> Self {
        Self::with_inner(MemoryHealthBackend::with_samples(samples))
    }

    pub fn with_inner(inner: MemoryHealthBackend) -> Self {
        Self {
            inner,
            saves: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
            read_gate: None,
            fail_save_at: None,
            fail_background: false,
        }
    }

    /// Block every window query on `gate` until it is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.read_gate = Some(gate);
        self
    }

    /// Fail the `n`-th save call (1-based) with a store error.
    pub fn failing_save_at(mut self, n: usize) -> Self {
        self.fail_save_at = Some(n);
        self
    }

    /// Reject background-delivery registration.
    pub fn failing_background(mut self) -> Self {
        self.fail_background = true;
        self
    }

    /// Number of save calls seen so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of window queries seen so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Snapshot of stored samples, in insertion order.
    pub async fn samples(&self) -> Vec<MetricSample> {
        self.inner.samples().await
    }
}

impl Default for FakeHealthBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthBackend for FakeHealthBackend {
    fn data_available(&self) -> bool {
        self.inner.data_available()
    }

    async fn request_authorization(&self, scopes: &ScopeSet) -> Result<AuthorizationStatus> {
        self.inner.request_authorization(scopes).await
    }

    async fn save_sample(&self, sample: MetricSample) -> Result<()> {
        let call = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_save_at == Some(call) {
            return Err(Error::Store {
                message: format!("injected save failure on call {call}"),
            });
        }
        self.inner.save_sample(sample).await
    }

    async fn samples_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.read_gate {
            gate.notified().await;
        }
        self.inner.samples_between(from, to).await
    }

    async fn enable_background_delivery(&self) -> Result<()> {
        if self.fail_background {
            return Err(Error::Store {
                message: "injected background delivery failure".to_string(),
            });
        }
        self.inner.enable_background_delivery().await
    }
}
