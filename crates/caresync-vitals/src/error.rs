//! Error types for caresync-vitals

/// Result type for vital-signs adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur against the vital-signs store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform exposes no health data capability at all
    #[error("health data is not available on this platform")]
    HealthDataUnavailable,

    /// Neither a read nor a write scope is configured for the metric.
    /// A configuration error, distinct from the user denying access.
    #[error("no read or write scopes configured for {metric}")]
    NoScopesConfigured { metric: String },

    /// Access to the store has not been requested yet
    #[error("not authorized: access to the vital-signs store has not been requested")]
    NotAuthorized,

    /// The platform rejected a save, query, or registration
    #[error("vital-signs store error: {message}")]
    Store { message: String },
}
