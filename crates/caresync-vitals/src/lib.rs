//! Vital-signs store adapter.
//!
//! Typed read/write access to the external platform health repository for a
//! single metric (blood glucose, mg/dL), plus the background-wake
//! subscription used to trigger a sync when other writers add data.
//!
//! The platform itself sits behind the [`HealthBackend`] trait;
//! [`VitalSignsStore`] layers the authorization state machine and the
//! newest-first read ordering on top of it.

pub mod backend;
pub mod error;
pub mod memory;
pub mod sample;
pub mod store;

pub use backend::{HealthBackend, ScopeSet};
pub use error::{Error, Result};
pub use memory::MemoryHealthBackend;
pub use sample::{AuthorizationStatus, GLUCOSE_UNIT, MetricSample};
pub use store::VitalSignsStore;
