//! Artifact coverage check.
//!
//! Enumerates every dataset and parameter combination the selectors can
//! produce and reports which artifacts are missing or do not line up with
//! their dataset.

use std::collections::HashMap;
use std::fmt;

use clusterview_core::{Algorithm, AlgorithmParams, ClusteringArtifact};
use log::{debug, info};
use rayon::prelude::*;

use crate::dataset::load_dataset;
use crate::retrieve::fetch_result;
use crate::source::ArtifactSource;
use crate::Error;

/// Outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageStatus {
    /// Artifact decodes and labels every point.
    Present,
    /// No artifact at the expected path.
    Missing,
    /// Artifact decodes but its label count differs from the dataset.
    Mismatch {
        /// Number of dataset points.
        expected: usize,
        /// Number of labels.
        found: usize,
    },
    /// Artifact exists but could not be fetched or decoded.
    Unreadable(String),
}

impl CoverageStatus {
    /// Returns true for anything but [`CoverageStatus::Present`].
    #[must_use]
    pub fn is_problem(&self) -> bool {
        !matches!(self, CoverageStatus::Present)
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageStatus::Present => f.write_str("ok"),
            CoverageStatus::Missing => f.write_str("missing"),
            CoverageStatus::Mismatch { expected, found } => {
                write!(f, "{found} labels for {expected} points")
            }
            CoverageStatus::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

/// One checked artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageEntry {
    /// Dataset identifier.
    pub dataset: String,
    /// Parameter combination.
    pub params: AlgorithmParams,
    /// Artifact path below the source root.
    pub path: String,
    /// Outcome.
    pub status: CoverageStatus,
}

/// Result of a coverage scan.
#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    /// Checked artifacts, in dataset, algorithm and option order.
    pub entries: Vec<CoverageEntry>,
    /// Datasets that failed to load, with the error message.
    pub dataset_errors: Vec<(String, String)>,
}

impl CoverageReport {
    /// Number of artifacts checked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Number of artifacts present and consistent.
    #[must_use]
    pub fn present(&self) -> usize {
        self.entries.iter().filter(|e| !e.status.is_problem()).count()
    }

    /// Entries that need attention.
    pub fn problems(&self) -> impl Iterator<Item = &CoverageEntry> {
        self.entries.iter().filter(|e| e.status.is_problem())
    }

    /// Returns true if every dataset loaded and every artifact is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dataset_errors.is_empty() && self.problems().next().is_none()
    }
}

/// Checks every offered combination of `datasets` × `algorithms` in parallel.
///
/// Label counts are compared against the dataset when it loads; artifacts
/// of a dataset that fails to load are only checked for presence and shape.
#[must_use]
pub fn scan(
    source: &dyn ArtifactSource,
    datasets: &[&str],
    algorithms: &[Algorithm],
) -> CoverageReport {
    let mut point_counts = HashMap::new();
    let mut dataset_errors = Vec::new();
    for &name in datasets {
        match load_dataset(source, name) {
            Ok(ds) => {
                point_counts.insert(name, ds.len());
            }
            Err(e) => dataset_errors.push((name.to_string(), e.to_string())),
        }
    }

    let jobs: Vec<(&str, AlgorithmParams)> = datasets
        .iter()
        .flat_map(|&name| {
            algorithms
                .iter()
                .flat_map(|a| a.all_params())
                .map(move |p| (name, p))
        })
        .collect();
    debug!("checking {} artifacts in {}", jobs.len(), source.describe());

    let entries: Vec<CoverageEntry> = jobs
        .par_iter()
        .map(|&(name, params)| {
            let status = match fetch_result(source, name, &params) {
                Ok(artifact) => {
                    let found = artifact.labels().len();
                    match point_counts.get(name) {
                        Some(&expected) if expected != found => {
                            CoverageStatus::Mismatch { expected, found }
                        }
                        _ => CoverageStatus::Present,
                    }
                }
                Err(Error::ResultNotFound { .. }) => CoverageStatus::Missing,
                Err(e) => CoverageStatus::Unreadable(e.to_string()),
            };
            CoverageEntry {
                dataset: name.to_string(),
                params,
                path: params.result_path(name),
                status,
            }
        })
        .collect();

    let report = CoverageReport {
        entries,
        dataset_errors,
    };
    info!(
        "coverage: {}/{} artifacts present",
        report.present(),
        report.total()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use serde_json::json;

    fn source() -> MemorySource {
        let mut source = MemorySource::new().with_json(
            "/datasets/blobs.json",
            &json!({"points": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}]}),
        );
        for params in Algorithm::MeanShift.all_params() {
            source.insert(
                params.result_path("blobs"),
                json!({"labels": [0, 0], "cluster_centers": [], "n_clusters": 1}).to_string(),
            );
        }
        source.insert(
            "/clustering-results/meanshift/blobs_bw2.json",
            json!({"labels": [0], "cluster_centers": [], "n_clusters": 1}).to_string(),
        );
        source.insert("/clustering-results/meanshift/blobs_bw0_3.json", "[]");
        source
    }

    #[test]
    fn test_scan_counts_and_problems() {
        let report = scan(&source(), &["blobs"], &[Algorithm::MeanShift]);
        assert_eq!(report.total(), 6);
        assert_eq!(report.present(), 4);
        assert!(!report.is_complete());

        let problems: Vec<_> = report.problems().collect();
        assert_eq!(problems.len(), 2);
        assert!(problems
            .iter()
            .any(|e| matches!(e.status, CoverageStatus::Unreadable(_))));
        assert!(problems.iter().any(|e| e.status
            == CoverageStatus::Mismatch {
                expected: 2,
                found: 1
            }));
    }

    #[test]
    fn test_scan_reports_missing_and_dataset_errors() {
        let report = scan(&source(), &["blobs", "moons"], &[Algorithm::KMeans]);
        assert_eq!(report.total(), 14);
        assert_eq!(report.present(), 0);
        assert!(report
            .entries
            .iter()
            .all(|e| e.status == CoverageStatus::Missing));
        assert_eq!(report.dataset_errors.len(), 1);
        assert_eq!(report.dataset_errors[0].0, "moons");
    }

    #[test]
    fn test_entries_keep_enumeration_order() {
        let report = scan(&source(), &["blobs"], &[Algorithm::MeanShift]);
        let paths: Vec<_> = report.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths[0], "/clustering-results/meanshift/blobs_bw0_3.json");
        assert_eq!(paths[5], "/clustering-results/meanshift/blobs_bw2.json");
    }
}
