//! Care-plan store adapter.
//!
//! Typed access to the internal task/outcome tracker: idempotent task
//! provisioning, task-uuid resolution, and outcome recording against the
//! occurrence matching the outcome's calendar day.

pub mod backend;
pub mod error;
pub mod memory;
pub mod outcome;
pub mod schedule;
pub mod store;
pub mod task;

pub use backend::CarePlanBackend;
pub use error::{Error, Result};
pub use memory::MemoryCarePlanBackend;
pub use outcome::{Outcome, OutcomeValue};
pub use schedule::{Recurrence, Schedule};
pub use store::CarePlanStore;
pub use task::Task;
