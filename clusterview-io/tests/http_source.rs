use std::time::Duration;

use clusterview_core::{AlgorithmParams, DbscanParams, ResultArtifact};
use clusterview_io::{fetch_result_for, load_dataset, Error, HttpSource, SourceConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_blobs(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/datasets/blobs.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Gaussian Blobs",
            "points": [{"x": 0.0, "y": 0.0}, {"x": 0.1, "y": 0.1}, {"x": 9.0, "y": 9.0}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/clustering-results/dbscan/blobs_eps0_3_min5.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dataset": "blobs",
            "algorithm": "dbscan",
            "params": {"eps": 0.3, "min_samples": 5},
            "labels": [0, 0, -1],
            "noise_points": 1
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn http_source_loads_dataset_and_result() {
    let server = MockServer::start().await;
    mount_blobs(&server).await;
    let base = server.uri();

    let artifact = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&base, Some(Duration::from_secs(5))).unwrap();
        let dataset = load_dataset(&source, "blobs").unwrap();
        assert_eq!(dataset.name, "Gaussian Blobs");
        assert_eq!(dataset.len(), 3);
        fetch_result_for(
            &source,
            &dataset,
            &AlgorithmParams::Dbscan(DbscanParams::default()),
        )
        .unwrap()
    })
    .await
    .unwrap();

    match artifact {
        ResultArtifact::Dbscan(r) => assert_eq!(r.noise_points, 1),
        other => panic!("unexpected artifact {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn http_source_reports_missing_files() {
    let server = MockServer::start().await;
    mount_blobs(&server).await;
    let base = format!("{}/", server.uri());

    let (dataset_err, result_err) = tokio::task::spawn_blocking(move || {
        let source = SourceConfig::new(base).open().unwrap();
        let dataset_err = load_dataset(source.as_ref(), "moons").unwrap_err();

        let dataset = load_dataset(source.as_ref(), "blobs").unwrap();
        let params = AlgorithmParams::Dbscan(DbscanParams {
            eps: 1.0,
            min_samples: 5,
        });
        let result_err = fetch_result_for(source.as_ref(), &dataset, &params).unwrap_err();
        (dataset_err, result_err)
    })
    .await
    .unwrap();

    assert!(matches!(
        dataset_err,
        Error::DatasetFetch {
            status: Some(404),
            ..
        }
    ));
    assert!(dataset_err.to_string().contains("404"));
    assert_eq!(
        result_err.to_string(),
        "No results found for blobs with eps=1, min_samples=5"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn http_source_server_error_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets/aniso.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let base = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&base, None).unwrap();
        load_dataset(&source, "aniso").unwrap_err()
    })
    .await
    .unwrap();

    assert_eq!(
        err.to_string(),
        "Failed to load dataset \"aniso\": 500 Internal Server Error"
    );
}

#[test]
fn http_source_unreachable_host_is_fetch_error_without_status() {
    let source = HttpSource::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
    let err = load_dataset(&source, "blobs").unwrap_err();
    assert!(matches!(err, Error::DatasetFetch { status: None, .. }));
}
