//! Algorithm descriptors, parameter schemas and artifact filename rules.
//!
//! Every algorithm is described by the same handful of things: a directory
//! slug, a parameter schema with fixed option lists, a filename rule and a
//! result shape. [`ResultParams`] ties a typed parameter tuple to its result
//! shape; [`AlgorithmParams`] is the type-erased form the selection state and
//! the surfaces carry around.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::artifact::{
    AgglomerativeResult, ClusteringArtifact, DbscanResult, GmmResult, KMeansResult,
    MeanShiftResult, ResultArtifact,
};
use crate::{Error, Result};

/// Root directory of all precomputed results.
pub const RESULTS_ROOT: &str = "/clustering-results";

/// K-Means `k` options.
pub const KMEANS_K: [u32; 7] = [2, 3, 4, 5, 6, 7, 8];
/// DBSCAN `eps` options.
pub const DBSCAN_EPS: [f64; 5] = [0.1, 0.3, 0.5, 0.8, 1.0];
/// DBSCAN `min_samples` options.
pub const DBSCAN_MIN_SAMPLES: [u32; 4] = [3, 5, 8, 10];
/// Agglomerative `n_clusters` options.
pub const AGGLOMERATIVE_N_CLUSTERS: [u32; 5] = [2, 3, 4, 5, 6];
/// Mean Shift `bandwidth` options.
pub const MEANSHIFT_BANDWIDTH: [f64; 6] = [0.3, 0.5, 0.8, 1.0, 1.5, 2.0];
/// GMM `n_components` options.
pub const GMM_N_COMPONENTS: [u32; 5] = [2, 3, 4, 5, 6];

/// Renders a decimal the way it appears in messages and selectors.
///
/// Integral values drop the fractional part (`1.0` -> `1`), everything else
/// uses the shortest round-trip form (`0.3` -> `0.3`).
#[must_use]
#[allow(clippy::float_cmp)]
pub fn display_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Renders a decimal for use inside an artifact filename (`0.3` -> `0_3`).
#[must_use]
pub fn file_token(value: f64) -> String {
    display_decimal(value).replace('.', "_")
}

fn contains_decimal(options: &[f64], value: f64) -> bool {
    options.iter().any(|o| (o - value).abs() < 1e-9)
}

fn invalid(parameter: &'static str, value: impl fmt::Display) -> Error {
    Error::InvalidOption {
        parameter,
        value: value.to_string(),
    }
}

/// Clustering algorithm with a precomputed result store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// Centroid-based partitioning.
    KMeans,
    /// Density-based clustering with noise.
    Dbscan,
    /// Bottom-up hierarchical clustering.
    Agglomerative,
    /// Mode-seeking kernel density clustering.
    MeanShift,
    /// Gaussian mixture model.
    Gmm,
}

impl Algorithm {
    /// All algorithms, in page order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::KMeans,
        Algorithm::Dbscan,
        Algorithm::Agglomerative,
        Algorithm::MeanShift,
        Algorithm::Gmm,
    ];

    /// Directory name under [`RESULTS_ROOT`].
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::KMeans => "kmeans",
            Algorithm::Dbscan => "dbscan",
            Algorithm::Agglomerative => "agglomerative",
            Algorithm::MeanShift => "meanshift",
            Algorithm::Gmm => "gmm",
        }
    }

    /// Short display name used in titles.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::KMeans => "K-Means",
            Algorithm::Dbscan => "DBSCAN",
            Algorithm::Agglomerative => "Agglomerative",
            Algorithm::MeanShift => "Mean Shift",
            Algorithm::Gmm => "GMM",
        }
    }

    /// Parameter schema with the fixed option lists offered to users.
    #[must_use]
    pub fn schema(self) -> &'static [ParameterSchema] {
        match self {
            Algorithm::KMeans => &KMEANS_SCHEMA,
            Algorithm::Dbscan => &DBSCAN_SCHEMA,
            Algorithm::Agglomerative => &AGGLOMERATIVE_SCHEMA,
            Algorithm::MeanShift => &MEANSHIFT_SCHEMA,
            Algorithm::Gmm => &GMM_SCHEMA,
        }
    }

    /// Parameters selected when the page opens.
    #[must_use]
    pub fn default_params(self) -> AlgorithmParams {
        match self {
            Algorithm::KMeans => AlgorithmParams::KMeans(KMeansParams::default()),
            Algorithm::Dbscan => AlgorithmParams::Dbscan(DbscanParams::default()),
            Algorithm::Agglomerative => {
                AlgorithmParams::Agglomerative(AgglomerativeParams::default())
            }
            Algorithm::MeanShift => AlgorithmParams::MeanShift(MeanShiftParams::default()),
            Algorithm::Gmm => AlgorithmParams::Gmm(GmmParams::default()),
        }
    }

    /// Every parameter combination the selectors can produce.
    #[must_use]
    pub fn all_params(self) -> Vec<AlgorithmParams> {
        match self {
            Algorithm::KMeans => KMEANS_K
                .iter()
                .map(|&k| AlgorithmParams::KMeans(KMeansParams { k }))
                .collect(),
            Algorithm::Dbscan => DBSCAN_EPS
                .iter()
                .flat_map(|&eps| {
                    DBSCAN_MIN_SAMPLES.iter().map(move |&min_samples| {
                        AlgorithmParams::Dbscan(DbscanParams { eps, min_samples })
                    })
                })
                .collect(),
            Algorithm::Agglomerative => AGGLOMERATIVE_N_CLUSTERS
                .iter()
                .flat_map(|&n_clusters| {
                    Linkage::ALL.iter().map(move |&linkage| {
                        AlgorithmParams::Agglomerative(AgglomerativeParams {
                            n_clusters,
                            linkage,
                        })
                    })
                })
                .collect(),
            Algorithm::MeanShift => MEANSHIFT_BANDWIDTH
                .iter()
                .map(|&bandwidth| AlgorithmParams::MeanShift(MeanShiftParams { bandwidth }))
                .collect(),
            Algorithm::Gmm => GMM_N_COMPONENTS
                .iter()
                .flat_map(|&n_components| {
                    CovarianceType::ALL.iter().map(move |&covariance_type| {
                        AlgorithmParams::Gmm(GmmParams {
                            n_components,
                            covariance_type,
                        })
                    })
                })
                .collect(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "kmeans" | "k-means" => Ok(Algorithm::KMeans),
            "dbscan" => Ok(Algorithm::Dbscan),
            "agglomerative" => Ok(Algorithm::Agglomerative),
            "meanshift" | "mean-shift" => Ok(Algorithm::MeanShift),
            "gmm" => Ok(Algorithm::Gmm),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// One selectable parameter of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSchema {
    /// Key used by [`AlgorithmParams::get`] and [`AlgorithmParams::with`].
    pub key: &'static str,
    /// Selector label.
    pub label: &'static str,
    /// Offered values, rendered as they appear in the selector.
    pub options: &'static [&'static str],
}

const KMEANS_SCHEMA: [ParameterSchema; 1] = [ParameterSchema {
    key: "k",
    label: "Clusters (k)",
    options: &["2", "3", "4", "5", "6", "7", "8"],
}];

const DBSCAN_SCHEMA: [ParameterSchema; 2] = [
    ParameterSchema {
        key: "eps",
        label: "eps (ε)",
        options: &["0.1", "0.3", "0.5", "0.8", "1"],
    },
    ParameterSchema {
        key: "min_samples",
        label: "min_samples",
        options: &["3", "5", "8", "10"],
    },
];

const AGGLOMERATIVE_SCHEMA: [ParameterSchema; 2] = [
    ParameterSchema {
        key: "n_clusters",
        label: "Clusters",
        options: &["2", "3", "4", "5", "6"],
    },
    ParameterSchema {
        key: "linkage",
        label: "Linkage",
        options: &["ward", "complete", "average", "single"],
    },
];

const MEANSHIFT_SCHEMA: [ParameterSchema; 1] = [ParameterSchema {
    key: "bandwidth",
    label: "Bandwidth",
    options: &["0.3", "0.5", "0.8", "1", "1.5", "2"],
}];

const GMM_SCHEMA: [ParameterSchema; 2] = [
    ParameterSchema {
        key: "n_components",
        label: "Components",
        options: &["2", "3", "4", "5", "6"],
    },
    ParameterSchema {
        key: "covariance_type",
        label: "Covariance",
        options: &["full", "tied", "diag", "spherical"],
    },
];

/// Inter-cluster distance rule for agglomerative clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Minimizes within-cluster variance.
    #[default]
    Ward,
    /// Maximum distance between clusters.
    Complete,
    /// Average distance between all points.
    Average,
    /// Minimum distance between clusters.
    Single,
}

impl Linkage {
    /// All linkage rules, in selector order.
    pub const ALL: [Linkage; 4] = [
        Linkage::Ward,
        Linkage::Complete,
        Linkage::Average,
        Linkage::Single,
    ];

    /// Lowercase name used in filenames.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Linkage::Ward => "ward",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
            Linkage::Single => "single",
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Linkage::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| invalid("linkage", s))
    }
}

/// Covariance structure of a Gaussian mixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovarianceType {
    /// Each component has its own covariance matrix.
    #[default]
    Full,
    /// All components share one covariance matrix.
    Tied,
    /// Axis-aligned ellipses.
    Diag,
    /// Single variance per component.
    Spherical,
}

impl CovarianceType {
    /// All covariance types, in selector order.
    pub const ALL: [CovarianceType; 4] = [
        CovarianceType::Full,
        CovarianceType::Tied,
        CovarianceType::Diag,
        CovarianceType::Spherical,
    ];

    /// Lowercase name used in filenames.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CovarianceType::Full => "full",
            CovarianceType::Tied => "tied",
            CovarianceType::Diag => "diag",
            CovarianceType::Spherical => "spherical",
        }
    }
}

impl fmt::Display for CovarianceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CovarianceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CovarianceType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| invalid("covariance_type", s))
    }
}

/// A typed parameter tuple bound to its algorithm's result shape.
pub trait ResultParams: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Decoded artifact shape.
    type Artifact: ClusteringArtifact + DeserializeOwned + Clone + Send + 'static;

    /// Algorithm these parameters configure.
    const ALGORITHM: Algorithm;

    /// Artifact filename for `dataset` (`blobs_eps0_3_min5.json`).
    fn file_name(&self, dataset: &str) -> String;

    /// Every parameter value, as named in "not found" messages.
    fn describe(&self) -> String;

    /// Parenthesised part of the plot title.
    fn title_label(&self) -> String;

    /// Checks membership in the offered option sets.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOption`] naming the first value outside its set.
    fn validate(&self) -> Result<()>;

    /// Type-erased form.
    fn erase(&self) -> AlgorithmParams;

    /// Wraps a decoded artifact into the type-erased result.
    fn wrap(artifact: Self::Artifact) -> ResultArtifact;

    /// Artifact path below the source root.
    fn result_path(&self, dataset: &str) -> String {
        format!(
            "{RESULTS_ROOT}/{}/{}",
            Self::ALGORITHM.slug(),
            self.file_name(dataset)
        )
    }
}

/// K-Means parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMeansParams {
    /// Number of clusters.
    pub k: u32,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self { k: 3 }
    }
}

impl ResultParams for KMeansParams {
    type Artifact = KMeansResult;
    const ALGORITHM: Algorithm = Algorithm::KMeans;

    fn file_name(&self, dataset: &str) -> String {
        format!("{dataset}_k{}.json", self.k)
    }

    fn describe(&self) -> String {
        format!("k={}", self.k)
    }

    fn title_label(&self) -> String {
        format!("k={}", self.k)
    }

    fn validate(&self) -> Result<()> {
        if KMEANS_K.contains(&self.k) {
            Ok(())
        } else {
            Err(invalid("k", self.k))
        }
    }

    fn erase(&self) -> AlgorithmParams {
        AlgorithmParams::KMeans(*self)
    }

    fn wrap(artifact: KMeansResult) -> ResultArtifact {
        ResultArtifact::KMeans(artifact)
    }
}

/// DBSCAN parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DbscanParams {
    /// Neighbourhood radius.
    pub eps: f64,
    /// Minimum neighbourhood size for a core point.
    pub min_samples: u32,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.3,
            min_samples: 5,
        }
    }
}

impl ResultParams for DbscanParams {
    type Artifact = DbscanResult;
    const ALGORITHM: Algorithm = Algorithm::Dbscan;

    fn file_name(&self, dataset: &str) -> String {
        format!(
            "{dataset}_eps{}_min{}.json",
            file_token(self.eps),
            self.min_samples
        )
    }

    fn describe(&self) -> String {
        format!(
            "eps={}, min_samples={}",
            display_decimal(self.eps),
            self.min_samples
        )
    }

    fn title_label(&self) -> String {
        self.describe()
    }

    fn validate(&self) -> Result<()> {
        if !contains_decimal(&DBSCAN_EPS, self.eps) {
            return Err(invalid("eps", display_decimal(self.eps)));
        }
        if !DBSCAN_MIN_SAMPLES.contains(&self.min_samples) {
            return Err(invalid("min_samples", self.min_samples));
        }
        Ok(())
    }

    fn erase(&self) -> AlgorithmParams {
        AlgorithmParams::Dbscan(*self)
    }

    fn wrap(artifact: DbscanResult) -> ResultArtifact {
        ResultArtifact::Dbscan(artifact)
    }
}

/// Agglomerative clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgglomerativeParams {
    /// Number of clusters to cut the tree at.
    pub n_clusters: u32,
    /// Merge rule.
    pub linkage: Linkage,
}

impl Default for AgglomerativeParams {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            linkage: Linkage::Ward,
        }
    }
}

impl ResultParams for AgglomerativeParams {
    type Artifact = AgglomerativeResult;
    const ALGORITHM: Algorithm = Algorithm::Agglomerative;

    fn file_name(&self, dataset: &str) -> String {
        format!("{dataset}_k{}_{}.json", self.n_clusters, self.linkage)
    }

    fn describe(&self) -> String {
        format!("k={}, linkage={}", self.n_clusters, self.linkage)
    }

    fn title_label(&self) -> String {
        format!("k={}, {}", self.n_clusters, self.linkage)
    }

    fn validate(&self) -> Result<()> {
        if AGGLOMERATIVE_N_CLUSTERS.contains(&self.n_clusters) {
            Ok(())
        } else {
            Err(invalid("n_clusters", self.n_clusters))
        }
    }

    fn erase(&self) -> AlgorithmParams {
        AlgorithmParams::Agglomerative(*self)
    }

    fn wrap(artifact: AgglomerativeResult) -> ResultArtifact {
        ResultArtifact::Agglomerative(artifact)
    }
}

/// Mean Shift parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanShiftParams {
    /// Kernel radius.
    pub bandwidth: f64,
}

impl Default for MeanShiftParams {
    fn default() -> Self {
        Self { bandwidth: 1.0 }
    }
}

impl ResultParams for MeanShiftParams {
    type Artifact = MeanShiftResult;
    const ALGORITHM: Algorithm = Algorithm::MeanShift;

    fn file_name(&self, dataset: &str) -> String {
        format!("{dataset}_bw{}.json", file_token(self.bandwidth))
    }

    fn describe(&self) -> String {
        format!("bandwidth={}", display_decimal(self.bandwidth))
    }

    fn title_label(&self) -> String {
        self.describe()
    }

    fn validate(&self) -> Result<()> {
        if contains_decimal(&MEANSHIFT_BANDWIDTH, self.bandwidth) {
            Ok(())
        } else {
            Err(invalid("bandwidth", display_decimal(self.bandwidth)))
        }
    }

    fn erase(&self) -> AlgorithmParams {
        AlgorithmParams::MeanShift(*self)
    }

    fn wrap(artifact: MeanShiftResult) -> ResultArtifact {
        ResultArtifact::MeanShift(artifact)
    }
}

/// Gaussian mixture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmmParams {
    /// Number of mixture components.
    pub n_components: u32,
    /// Covariance structure.
    pub covariance_type: CovarianceType,
}

impl Default for GmmParams {
    fn default() -> Self {
        Self {
            n_components: 3,
            covariance_type: CovarianceType::Full,
        }
    }
}

impl ResultParams for GmmParams {
    type Artifact = GmmResult;
    const ALGORITHM: Algorithm = Algorithm::Gmm;

    fn file_name(&self, dataset: &str) -> String {
        format!(
            "{dataset}_k{}_{}.json",
            self.n_components, self.covariance_type
        )
    }

    fn describe(&self) -> String {
        format!(
            "k={}, covariance={}",
            self.n_components, self.covariance_type
        )
    }

    fn title_label(&self) -> String {
        format!("k={}, {}", self.n_components, self.covariance_type)
    }

    fn validate(&self) -> Result<()> {
        if GMM_N_COMPONENTS.contains(&self.n_components) {
            Ok(())
        } else {
            Err(invalid("n_components", self.n_components))
        }
    }

    fn erase(&self) -> AlgorithmParams {
        AlgorithmParams::Gmm(*self)
    }

    fn wrap(artifact: GmmResult) -> ResultArtifact {
        ResultArtifact::Gmm(artifact)
    }
}

/// Parameter selection for any algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlgorithmParams {
    /// K-Means selection.
    KMeans(KMeansParams),
    /// DBSCAN selection.
    Dbscan(DbscanParams),
    /// Agglomerative selection.
    Agglomerative(AgglomerativeParams),
    /// Mean Shift selection.
    MeanShift(MeanShiftParams),
    /// GMM selection.
    Gmm(GmmParams),
}

macro_rules! with_params {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            AlgorithmParams::KMeans($p) => $body,
            AlgorithmParams::Dbscan($p) => $body,
            AlgorithmParams::Agglomerative($p) => $body,
            AlgorithmParams::MeanShift($p) => $body,
            AlgorithmParams::Gmm($p) => $body,
        }
    };
}

fn parse_u32(parameter: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| invalid(parameter, value))
}

fn parse_f64(parameter: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| invalid(parameter, value))
}

impl AlgorithmParams {
    /// Algorithm this selection belongs to.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmParams::KMeans(_) => Algorithm::KMeans,
            AlgorithmParams::Dbscan(_) => Algorithm::Dbscan,
            AlgorithmParams::Agglomerative(_) => Algorithm::Agglomerative,
            AlgorithmParams::MeanShift(_) => Algorithm::MeanShift,
            AlgorithmParams::Gmm(_) => Algorithm::Gmm,
        }
    }

    /// Artifact filename for `dataset`.
    #[must_use]
    pub fn file_name(&self, dataset: &str) -> String {
        with_params!(self, p => p.file_name(dataset))
    }

    /// Artifact path below the source root.
    #[must_use]
    pub fn result_path(&self, dataset: &str) -> String {
        with_params!(self, p => p.result_path(dataset))
    }

    /// Every parameter value, as named in "not found" messages.
    #[must_use]
    pub fn describe(&self) -> String {
        with_params!(self, p => p.describe())
    }

    /// Parenthesised part of the plot title.
    #[must_use]
    pub fn title_label(&self) -> String {
        with_params!(self, p => p.title_label())
    }

    /// Checks membership in the offered option sets.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOption`] naming the first value outside its set.
    pub fn validate(&self) -> Result<()> {
        with_params!(self, p => p.validate())
    }

    /// Current value of `key`, rendered as in the schema options.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match (self, key) {
            (AlgorithmParams::KMeans(p), "k") => Some(p.k.to_string()),
            (AlgorithmParams::Dbscan(p), "eps") => Some(display_decimal(p.eps)),
            (AlgorithmParams::Dbscan(p), "min_samples") => Some(p.min_samples.to_string()),
            (AlgorithmParams::Agglomerative(p), "n_clusters") => Some(p.n_clusters.to_string()),
            (AlgorithmParams::Agglomerative(p), "linkage") => Some(p.linkage.to_string()),
            (AlgorithmParams::MeanShift(p), "bandwidth") => Some(display_decimal(p.bandwidth)),
            (AlgorithmParams::Gmm(p), "n_components") => Some(p.n_components.to_string()),
            (AlgorithmParams::Gmm(p), "covariance_type") => Some(p.covariance_type.to_string()),
            _ => None,
        }
    }

    /// Returns a copy with `key` set to the parsed `value`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownParameter`] for keys outside the schema and
    /// [`Error::InvalidOption`] for values that do not parse or are not offered.
    pub fn with(&self, key: &str, value: &str) -> Result<Self> {
        let mut next = *self;
        match (&mut next, key) {
            (AlgorithmParams::KMeans(p), "k") => p.k = parse_u32("k", value)?,
            (AlgorithmParams::Dbscan(p), "eps") => p.eps = parse_f64("eps", value)?,
            (AlgorithmParams::Dbscan(p), "min_samples") => {
                p.min_samples = parse_u32("min_samples", value)?;
            }
            (AlgorithmParams::Agglomerative(p), "n_clusters") => {
                p.n_clusters = parse_u32("n_clusters", value)?;
            }
            (AlgorithmParams::Agglomerative(p), "linkage") => p.linkage = value.parse()?,
            (AlgorithmParams::MeanShift(p), "bandwidth") => {
                p.bandwidth = parse_f64("bandwidth", value)?;
            }
            (AlgorithmParams::Gmm(p), "n_components") => {
                p.n_components = parse_u32("n_components", value)?;
            }
            (AlgorithmParams::Gmm(p), "covariance_type") => p.covariance_type = value.parse()?,
            _ => {
                return Err(Error::UnknownParameter {
                    algorithm: self.algorithm().display_name(),
                    key: key.to_string(),
                })
            }
        }
        next.validate()?;
        Ok(next)
    }
}

impl fmt::Display for AlgorithmParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.algorithm(), self.describe())
    }
}
