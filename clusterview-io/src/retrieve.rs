//! Result artifact retrieval.
//!
//! The artifact path is a pure function of dataset and parameters, so the
//! same selection always targets the same file. Nothing is cached.

use clusterview_core::{
    AlgorithmParams, ClusteringArtifact, Dataset, ResultArtifact, ResultParams,
};
use log::{debug, error, info};

use crate::source::ArtifactSource;
use crate::{Error, Result};

/// Fetches and decodes the artifact for `params` on `dataset`.
///
/// Option membership is not checked; a value that was never offered simply
/// has no artifact.
///
/// # Errors
/// - [`Error::ResultNotFound`] for a non-2xx response
/// - [`Error::ResultRetrieval`] for transport or decoding faults
pub fn fetch_typed<P: ResultParams>(
    source: &dyn ArtifactSource,
    dataset: &str,
    params: &P,
) -> Result<P::Artifact> {
    let path = params.result_path(dataset);
    debug!("fetching {} result from {path}", P::ALGORITHM.display_name());

    let response = source.fetch(&path).map_err(|e| {
        let err = Error::ResultRetrieval {
            path: path.clone(),
            message: e.to_string(),
        };
        error!("{err}");
        err
    })?;
    if !response.is_success() {
        let err = Error::ResultNotFound {
            dataset: dataset.to_string(),
            params: params.describe(),
            status: response.status,
        };
        error!("{err} ({})", response.status_line());
        return Err(err);
    }

    let artifact: P::Artifact =
        serde_json::from_slice(&response.body).map_err(|e| Error::ResultRetrieval {
            path: path.clone(),
            message: e.to_string(),
        })?;
    info!(
        "Loaded {} results for {dataset} ({})",
        P::ALGORITHM.display_name(),
        params.describe()
    );
    Ok(artifact)
}

/// Type-erased [`fetch_typed`].
///
/// # Errors
/// See [`fetch_typed`].
pub fn fetch_result(
    source: &dyn ArtifactSource,
    dataset: &str,
    params: &AlgorithmParams,
) -> Result<ResultArtifact> {
    fn erased<P: ResultParams>(
        source: &dyn ArtifactSource,
        dataset: &str,
        params: &P,
    ) -> Result<ResultArtifact> {
        fetch_typed(source, dataset, params).map(P::wrap)
    }

    match params {
        AlgorithmParams::KMeans(p) => erased(source, dataset, p),
        AlgorithmParams::Dbscan(p) => erased(source, dataset, p),
        AlgorithmParams::Agglomerative(p) => erased(source, dataset, p),
        AlgorithmParams::MeanShift(p) => erased(source, dataset, p),
        AlgorithmParams::Gmm(p) => erased(source, dataset, p),
    }
}

/// Fetches the artifact for a loaded dataset and checks it labels every point.
///
/// # Errors
/// See [`fetch_typed`], plus [`Error::LabelCountMismatch`].
pub fn fetch_result_for(
    source: &dyn ArtifactSource,
    dataset: &Dataset,
    params: &AlgorithmParams,
) -> Result<ResultArtifact> {
    let artifact = fetch_result(source, &dataset.id, params)?;
    check_label_count(dataset, &artifact)?;
    Ok(artifact)
}

/// Checks that `artifact` has exactly one label per point of `dataset`.
///
/// # Errors
/// Returns [`Error::LabelCountMismatch`] otherwise.
pub fn check_label_count(dataset: &Dataset, artifact: &impl ClusteringArtifact) -> Result<()> {
    let found = artifact.labels().len();
    if found == dataset.len() {
        Ok(())
    } else {
        let err = Error::LabelCountMismatch {
            dataset: dataset.id.clone(),
            expected: dataset.len(),
            found,
        };
        error!("{err}");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, Response};
    use clusterview_core::{DataPoint, DbscanParams, KMeansParams, MeanShiftParams};
    use serde_json::json;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_json(
                "/clustering-results/kmeans/blobs_k3.json",
                &json!({
                    "labels": [0, 1, 2],
                    "centroids": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}, {"x": 2.0, "y": 2.0}],
                    "inertia": 4.5
                }),
            )
            .with_json(
                "/clustering-results/meanshift/blobs_bw1.json",
                &json!({"labels": [0, 0], "cluster_centers": [{"x": 0.0, "y": 0.0}], "n_clusters": 1}),
            )
            .with_document("/clustering-results/kmeans/blobs_k4.json", "{\"labels\": ")
    }

    fn dataset(n: usize) -> Dataset {
        Dataset {
            id: "blobs".to_string(),
            name: "Gaussian Blobs".to_string(),
            points: vec![DataPoint::new(0.0, 0.0); n],
            description: None,
        }
    }

    #[test]
    fn test_fetch_typed_decodes_shape() {
        let r = fetch_typed(&source(), "blobs", &KMeansParams { k: 3 }).unwrap();
        assert_eq!(r.labels, vec![0, 1, 2]);
        assert_eq!(r.centroids.len(), 3);
    }

    #[test]
    fn test_not_found_names_dataset_and_params() {
        let params = DbscanParams {
            eps: 0.3,
            min_samples: 5,
        };
        let err = fetch_typed(&source(), "blobs", &params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No results found for blobs with eps=0.3, min_samples=5"
        );
    }

    #[test]
    fn test_undecodable_artifact_is_retrieval_error() {
        let err = fetch_result(&source(), "blobs", &AlgorithmParams::KMeans(KMeansParams { k: 4 }))
            .unwrap_err();
        assert!(matches!(err, Error::ResultRetrieval { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to load clustering results: "));
    }

    #[test]
    fn test_repeated_retrieval_is_identical() {
        let params = AlgorithmParams::MeanShift(MeanShiftParams { bandwidth: 1.0 });
        let first = fetch_result(&source(), "blobs", &params).unwrap();
        let second = fetch_result(&source(), "blobs", &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_label_count_is_enforced() {
        let params = AlgorithmParams::KMeans(KMeansParams { k: 3 });
        fetch_result_for(&source(), &dataset(3), &params).unwrap();

        match fetch_result_for(&source(), &dataset(5), &params) {
            Err(Error::LabelCountMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 5);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    struct FailingSource;

    impl ArtifactSource for FailingSource {
        fn fetch(&self, path: &str) -> Result<Response> {
            Err(Error::Transport {
                path: path.to_string(),
                message: "connection refused".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_transport_fault_is_retrieval_error() {
        let err = fetch_typed(&FailingSource, "blobs", &KMeansParams::default()).unwrap_err();
        assert!(matches!(err, Error::ResultRetrieval { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
