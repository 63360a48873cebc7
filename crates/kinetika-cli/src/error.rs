//! Error types for kinetika-cli

use thiserror::Error;

/// Result type alias for kinetika-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kinetika-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from kinetika-core
    #[error("Core error: {0}")]
    Core(#[from] kinetika_core::Error),

    /// Error from kinetika-features
    #[error("Feature table error: {0}")]
    Features(#[from] kinetika_features::Error),

    /// The named plan is not defined in the config.
    #[error("Unknown plan '{name}' (known plans: {known})")]
    UnknownPlan {
        /// Plan that was asked for
        name: String,
        /// Comma-separated list of configured plans
        known: String,
    },
}
