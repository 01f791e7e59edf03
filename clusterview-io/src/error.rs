//! Retrieval error types.

use thiserror::Error;

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Retrieval error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset identifier was empty.
    #[error("dataset name must not be empty")]
    EmptyDatasetName,

    /// Dataset could not be fetched (non-2xx status or transport fault).
    #[error("Failed to load dataset \"{name}\": {detail}")]
    DatasetFetch {
        /// Requested dataset.
        name: String,
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Status line or transport cause.
        detail: String,
    },

    /// Dataset document is not JSON or has no `points` array.
    #[error("Invalid dataset \"{name}\": {reason}")]
    DatasetShape {
        /// Requested dataset.
        name: String,
        /// What is wrong with the document.
        reason: String,
    },

    /// A point lacks numeric `x`/`y`.
    #[error("Invalid data point at index {index}: x and y must be numbers")]
    DatasetPoint {
        /// Requested dataset.
        name: String,
        /// Index of the first offending point.
        index: usize,
    },

    /// No artifact exists for the requested parameter combination.
    #[error("No results found for {dataset} with {params}")]
    ResultNotFound {
        /// Dataset identifier.
        dataset: String,
        /// Every requested parameter value, e.g. `eps=0.3, min_samples=5`.
        params: String,
        /// HTTP status returned by the source.
        status: u16,
    },

    /// Artifact exists but could not be read or decoded.
    #[error("Failed to load clustering results: {message}")]
    ResultRetrieval {
        /// Artifact path.
        path: String,
        /// Underlying cause.
        message: String,
    },

    /// Artifact labels do not line up with the dataset points.
    #[error("Result for {dataset} has {found} labels but the dataset has {expected} points")]
    LabelCountMismatch {
        /// Dataset identifier.
        dataset: String,
        /// Number of dataset points.
        expected: usize,
        /// Number of labels in the artifact.
        found: usize,
    },

    /// Source could not complete the request.
    #[error("transport error for {path}: {message}")]
    Transport {
        /// Requested path.
        path: String,
        /// Underlying cause.
        message: String,
    },

    /// Source configuration is unusable.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] clusterview_core::Error),
}
