//! Error types for caresync-core

/// Result type for sync engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the sync engine
///
/// The engine never downgrades an adapter error; the only suppression in the
/// system is the "task already exists" case inside the care-plan adapter's
/// provisioning path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vital-signs adapter failure
    #[error(transparent)]
    Vitals(#[from] caresync_vitals::Error),

    /// Care-plan adapter failure
    #[error(transparent)]
    CarePlan(#[from] caresync_careplan::Error),

    /// Configuration file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
