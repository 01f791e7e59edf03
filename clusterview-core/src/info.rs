//! Descriptive text shown next to each algorithm page.

use crate::params::Algorithm;

/// Info card content for one algorithm.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmInfo {
    /// Card title.
    pub name: &'static str,
    /// One-paragraph description.
    pub description: &'static str,
    /// Key properties.
    pub features: &'static [&'static str],
    /// Parameter (or parameter value) explanations.
    pub parameters: &'static [(&'static str, &'static str)],
    /// Extra note shown once a result is loaded.
    pub result_note: Option<&'static str>,
}

const KMEANS: AlgorithmInfo = AlgorithmInfo {
    name: "K-Means Algorithm",
    description: "K-Means is a centroid-based algorithm that partitions data into k clusters. \
                  Each data point belongs to the cluster with the nearest centroid.",
    features: &[
        "Requires specifying the number of clusters (k)",
        "Works well with spherical clusters",
        "Computationally efficient",
        "Sensitive to initial centroid placement",
    ],
    parameters: &[],
    result_note: Some(
        "Inertia measures within-cluster sum of squared distances. \
         Lower values indicate tighter clusters.",
    ),
};

const DBSCAN: AlgorithmInfo = AlgorithmInfo {
    name: "DBSCAN Algorithm",
    description: "DBSCAN (Density-Based Spatial Clustering of Applications with Noise) groups \
                  together points that are closely packed and marks outliers as noise.",
    features: &[
        "Automatically determines the number of clusters",
        "Can find clusters of arbitrary shape",
        "Identifies outliers as noise points",
        "Robust to outliers",
    ],
    parameters: &[
        (
            "eps (ε)",
            "Maximum distance between two samples for them to be considered neighbors",
        ),
        (
            "min_samples",
            "Minimum number of samples in a neighborhood for a point to be core",
        ),
    ],
    result_note: None,
};

const AGGLOMERATIVE: AlgorithmInfo = AlgorithmInfo {
    name: "Agglomerative Clustering",
    description: "Agglomerative clustering is a hierarchical clustering method that builds a \
                  tree of clusters by iteratively merging the closest pairs of clusters.",
    features: &[
        "Bottom-up hierarchical approach",
        "No assumptions about cluster shape",
        "Deterministic results",
        "Can capture nested cluster structures",
    ],
    parameters: &[
        ("Ward", "Minimizes within-cluster variance"),
        ("Complete", "Uses maximum distance between clusters"),
        ("Average", "Uses average distance between all points"),
        ("Single", "Uses minimum distance between clusters"),
    ],
    result_note: None,
};

const MEANSHIFT: AlgorithmInfo = AlgorithmInfo {
    name: "Mean Shift Algorithm",
    description: "Mean Shift is a non-parametric clustering algorithm that seeks modes (dense \
                  regions) in the data by iteratively shifting points toward the highest density.",
    features: &[
        "Automatically determines the number of clusters",
        "Can find clusters of arbitrary shape",
        "Mode-seeking algorithm based on kernel density estimation",
        "Robust to outliers",
    ],
    parameters: &[(
        "Bandwidth",
        "Controls the size of the region used for density estimation. Smaller values create \
         more clusters, larger values merge clusters.",
    )],
    result_note: None,
};

const GMM: AlgorithmInfo = AlgorithmInfo {
    name: "Gaussian Mixture Model",
    description: "GMM assumes data comes from a mixture of Gaussian distributions and uses the \
                  Expectation-Maximization algorithm to estimate parameters.",
    features: &[
        "Probabilistic clustering with soft assignments",
        "Provides cluster membership probabilities",
        "Can model elliptical clusters",
        "Estimates cluster shapes via covariance matrices",
    ],
    parameters: &[
        ("Full", "Each component has its own covariance matrix"),
        ("Tied", "All components share the same covariance matrix"),
        ("Diag", "Diagonal covariance matrices (axis-aligned ellipses)"),
        ("Spherical", "Spherical clusters (single variance parameter)"),
    ],
    result_note: None,
};

impl Algorithm {
    /// Info card content.
    #[must_use]
    pub fn info(self) -> &'static AlgorithmInfo {
        match self {
            Algorithm::KMeans => &KMEANS,
            Algorithm::Dbscan => &DBSCAN,
            Algorithm::Agglomerative => &AGGLOMERATIVE,
            Algorithm::MeanShift => &MEANSHIFT,
            Algorithm::Gmm => &GMM,
        }
    }
}
