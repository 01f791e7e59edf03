//! clusterview-core: Core types for browsing precomputed clustering results.
//!
//! This crate provides the dataset model, the per-algorithm parameter
//! descriptors and filename rules, the typed result artifacts, and the
//! plot model used by the viewer surfaces.
//!

pub mod artifact;
pub mod catalog;
pub mod error;
pub mod info;
pub mod params;
pub mod plot;
pub mod point;

pub use artifact::{
    AgglomerativeResult, Centroid, ClusteringArtifact, Covariance, DbscanResult, GmmResult,
    KMeansResult, MeanShiftResult, ResultArtifact, NOISE_LABEL,
};
pub use catalog::{available_datasets, dataset_path, DEFAULT_DATASET};
pub use error::{Error, Result};
pub use info::AlgorithmInfo;
pub use params::{
    AgglomerativeParams, Algorithm, AlgorithmParams, CovarianceType, DbscanParams, GmmParams,
    KMeansParams, Linkage, MeanShiftParams, ParameterSchema, ResultParams,
};
pub use plot::{PlotModel, ScatterSeries};
pub use point::{Bounds, DataPoint, Dataset};
