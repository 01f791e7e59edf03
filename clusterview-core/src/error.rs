//! Error types for clusterview-core.

use thiserror::Error;

/// Result type alias for clusterview-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for selection and parameter handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Algorithm slug not recognised.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Dataset identifier not in the catalog.
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    /// Parameter value outside the offered option set.
    #[error("invalid value for {parameter}: {value}")]
    InvalidOption {
        /// Parameter key, e.g. `eps`.
        parameter: &'static str,
        /// Rendered offending value.
        value: String,
    },

    /// Parameter key not part of the algorithm's schema.
    #[error("unknown parameter for {algorithm}: {key}")]
    UnknownParameter {
        /// Algorithm display name.
        algorithm: &'static str,
        /// Offending key.
        key: String,
    },

    /// Parameters belong to a different algorithm than expected.
    #[error("parameters for {found} given where {expected} was expected")]
    AlgorithmMismatch {
        /// Algorithm the caller is configured for.
        expected: &'static str,
        /// Algorithm the parameters belong to.
        found: &'static str,
    },
}
