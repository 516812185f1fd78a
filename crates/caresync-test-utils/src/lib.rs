//! Shared test utilities for the caresync workspace.
//!
//! Instrumented fake backends with call counters, failure injection, and
//! read gating, used by crate test suites and the integration tests. It is
//! a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`vitals`] — [`vitals::FakeHealthBackend`] over the in-memory store
//! - [`careplan`] — [`careplan::FakeCarePlanBackend`] over the in-memory store

pub mod careplan;
pub mod vitals;

/// Install a test-friendly tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
