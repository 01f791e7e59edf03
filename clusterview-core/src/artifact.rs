//! Precomputed clustering result artifacts.
//!
//! Artifacts are produced offline and trusted as-is: decoding gives them a
//! typed shape but their numbers are never checked here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::params::{
    display_decimal, AgglomerativeParams, Algorithm, AlgorithmParams, DbscanParams, GmmParams,
    KMeansParams, MeanShiftParams,
};

/// Label reserved for points that belong to no cluster.
pub const NOISE_LABEL: i32 = -1;

/// A cluster centre (centroid, mode or mixture mean).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Centroid {
    /// Creates a new centre.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Common view over every result shape.
pub trait ClusteringArtifact {
    /// Per-point cluster labels, in dataset order.
    fn labels(&self) -> &[i32];

    /// Cluster centres to mark on the plot, if the algorithm has any.
    fn centers(&self) -> Option<&[Centroid]> {
        None
    }

    /// Number of distinct clusters, noise excluded.
    fn cluster_count(&self) -> usize {
        self.labels()
            .iter()
            .filter(|&&l| l != NOISE_LABEL)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of points labelled as noise.
    fn noise_count(&self) -> usize {
        self.labels().iter().filter(|&&l| l == NOISE_LABEL).count()
    }
}

/// K-Means result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansResult {
    /// Dataset identifier echoed by the generator.
    pub dataset: Option<String>,
    /// Algorithm slug echoed by the generator.
    pub algorithm: Option<String>,
    /// Parameter echo.
    pub params: Option<KMeansParams>,
    /// Per-point labels.
    pub labels: Vec<i32>,
    /// Final centroids.
    pub centroids: Vec<Centroid>,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
}

impl ClusteringArtifact for KMeansResult {
    fn labels(&self) -> &[i32] {
        &self.labels
    }

    fn centers(&self) -> Option<&[Centroid]> {
        Some(&self.centroids)
    }
}

/// DBSCAN result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbscanResult {
    /// Dataset identifier echoed by the generator.
    pub dataset: Option<String>,
    /// Algorithm slug echoed by the generator.
    pub algorithm: Option<String>,
    /// Parameter echo.
    pub params: Option<DbscanParams>,
    /// Per-point labels, `-1` for noise.
    pub labels: Vec<i32>,
    /// Number of noise points.
    pub noise_points: usize,
}

impl ClusteringArtifact for DbscanResult {
    fn labels(&self) -> &[i32] {
        &self.labels
    }
}

/// Agglomerative clustering result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgglomerativeResult {
    /// Dataset identifier echoed by the generator.
    pub dataset: Option<String>,
    /// Algorithm slug echoed by the generator.
    pub algorithm: Option<String>,
    /// Parameter echo, including the linkage used.
    pub params: Option<AgglomerativeParams>,
    /// Per-point labels.
    pub labels: Vec<i32>,
}

impl ClusteringArtifact for AgglomerativeResult {
    fn labels(&self) -> &[i32] {
        &self.labels
    }
}

/// Mean Shift result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanShiftResult {
    /// Dataset identifier echoed by the generator.
    pub dataset: Option<String>,
    /// Algorithm slug echoed by the generator.
    pub algorithm: Option<String>,
    /// Parameter echo.
    pub params: Option<MeanShiftParams>,
    /// Per-point labels.
    pub labels: Vec<i32>,
    /// Modes found.
    pub cluster_centers: Vec<Centroid>,
    /// Number of modes.
    pub n_clusters: usize,
}

impl ClusteringArtifact for MeanShiftResult {
    fn labels(&self) -> &[i32] {
        &self.labels
    }

    fn centers(&self) -> Option<&[Centroid]> {
        Some(&self.cluster_centers)
    }
}

/// Covariance of one mixture component, tagged by structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Covariance {
    /// Full 2x2 matrix.
    Full {
        /// Row-major matrix.
        matrix: Vec<Vec<f64>>,
    },
    /// Matrix shared by all components (listed once).
    Tied {
        /// Row-major matrix.
        matrix: Vec<Vec<f64>>,
    },
    /// Diagonal entries only.
    Diag {
        /// Diagonal entries.
        diagonal: Vec<f64>,
    },
    /// Single variance.
    Spherical {
        /// Variance.
        variance: f64,
    },
}

/// Gaussian mixture result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmmResult {
    /// Dataset identifier echoed by the generator.
    pub dataset: Option<String>,
    /// Algorithm slug echoed by the generator.
    pub algorithm: Option<String>,
    /// Parameter echo.
    pub params: Option<GmmParams>,
    /// Per-point hard assignments.
    pub labels: Vec<i32>,
    /// Component means.
    pub means: Vec<Centroid>,
    /// Per-point membership probabilities.
    pub probabilities: Vec<Vec<f64>>,
    /// Component covariances.
    pub covariances: Vec<Covariance>,
    /// Mean log likelihood per sample.
    pub log_likelihood: f64,
    /// Mixture weights.
    pub weights: Vec<f64>,
}

impl ClusteringArtifact for GmmResult {
    fn labels(&self) -> &[i32] {
        &self.labels
    }

    fn centers(&self) -> Option<&[Centroid]> {
        Some(&self.means)
    }
}

/// A decoded artifact of any algorithm.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultArtifact {
    /// K-Means artifact.
    KMeans(KMeansResult),
    /// DBSCAN artifact.
    Dbscan(DbscanResult),
    /// Agglomerative artifact.
    Agglomerative(AgglomerativeResult),
    /// Mean Shift artifact.
    MeanShift(MeanShiftResult),
    /// GMM artifact.
    Gmm(GmmResult),
}

impl ResultArtifact {
    /// Algorithm that produced this artifact.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            ResultArtifact::KMeans(_) => Algorithm::KMeans,
            ResultArtifact::Dbscan(_) => Algorithm::Dbscan,
            ResultArtifact::Agglomerative(_) => Algorithm::Agglomerative,
            ResultArtifact::MeanShift(_) => Algorithm::MeanShift,
            ResultArtifact::Gmm(_) => Algorithm::Gmm,
        }
    }

    fn inner(&self) -> &dyn ClusteringArtifact {
        match self {
            ResultArtifact::KMeans(r) => r,
            ResultArtifact::Dbscan(r) => r,
            ResultArtifact::Agglomerative(r) => r,
            ResultArtifact::MeanShift(r) => r,
            ResultArtifact::Gmm(r) => r,
        }
    }

    /// Status lines for the dataset info card.
    ///
    /// `point_count` is the size of the dataset the result was fetched for.
    #[must_use]
    pub fn summary(
        &self,
        params: &AlgorithmParams,
        point_count: usize,
    ) -> Vec<(&'static str, String)> {
        match (self, params) {
            (ResultArtifact::KMeans(r), AlgorithmParams::KMeans(p)) => vec![
                ("Status", format!("Clustered into {} groups", p.k)),
                ("Inertia", format!("{:.2}", r.inertia)),
            ],
            (ResultArtifact::Dbscan(r), AlgorithmParams::Dbscan(_)) => {
                #[allow(clippy::cast_precision_loss)]
                let pct = r.noise_points as f64 / point_count.max(1) as f64 * 100.0;
                vec![
                    ("Status", format!("Found {} clusters", r.cluster_count())),
                    ("Noise Points", format!("{} ({pct:.1}%)", r.noise_points)),
                ]
            }
            (ResultArtifact::Agglomerative(_), AlgorithmParams::Agglomerative(p)) => vec![
                ("Status", format!("Clustered into {} groups", p.n_clusters)),
                ("Linkage Method", p.linkage.to_string()),
            ],
            (ResultArtifact::MeanShift(r), AlgorithmParams::MeanShift(p)) => vec![
                ("Status", format!("Found {} clusters", r.n_clusters)),
                ("Bandwidth", display_decimal(p.bandwidth)),
            ],
            (ResultArtifact::Gmm(r), AlgorithmParams::Gmm(p)) => vec![
                (
                    "Status",
                    format!("Fit {} Gaussian components", p.n_components),
                ),
                ("Covariance Type", p.covariance_type.to_string()),
                ("Log Likelihood", format!("{:.2}", r.log_likelihood)),
            ],
            _ => vec![("Status", format!("Found {} clusters", self.cluster_count()))],
        }
    }
}

impl ClusteringArtifact for ResultArtifact {
    fn labels(&self) -> &[i32] {
        self.inner().labels()
    }

    fn centers(&self) -> Option<&[Centroid]> {
        self.inner().centers()
    }
}
