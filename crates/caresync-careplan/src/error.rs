//! Error types for caresync-careplan

/// Result type for care-plan adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur against the care-plan store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task with the same logical id already exists. Provisioning treats
    /// this as expected and suppresses it; everything else propagates.
    #[error("task already exists: {id}")]
    TaskExists { id: String },

    /// No task with the given logical id at query time
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Any other store failure
    #[error("care-plan store error: {message}")]
    Store { message: String },
}
