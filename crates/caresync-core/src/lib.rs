//! Core orchestration for caresync.
//!
//! Owns the bidirectional sync engine between the vital-signs store and the
//! care-plan store, the observable sync state, and the sync configuration.
//! The adapters are injected at construction; nothing here is a singleton.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use config::SyncConfig;
pub use engine::{SyncEngine, SyncReport};
pub use error::{Error, Result};
pub use state::{SyncState, SyncStatePublisher};
