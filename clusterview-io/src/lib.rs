//! clusterview-io: Retrieval of datasets and precomputed clustering results.
//!
//! This crate reads datasets and result artifacts from a static store
//! (HTTP server, local directory or memory), validates them, and drives the
//! per-algorithm selection session on background workers.
//!

pub mod coverage;
mod dataset;
mod error;
mod retrieve;
pub mod session;
pub mod source;
mod writer;

pub use coverage::{scan, CoverageEntry, CoverageReport, CoverageStatus};
pub use dataset::{load_dataset, parse_dataset};
pub use error::{Error, Result};
pub use retrieve::{check_label_count, fetch_result, fetch_result_for, fetch_typed};
pub use session::{LoadedResult, Phase, Session};
pub use source::{
    ArtifactSource, DirectorySource, HttpSource, MemorySource, Response, SourceConfig,
};
pub use writer::DataFileWriter;
