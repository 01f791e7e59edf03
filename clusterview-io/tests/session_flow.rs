use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use clusterview_core::{Algorithm, AlgorithmParams, GmmParams};
use clusterview_io::{ArtifactSource, MemorySource, Phase, Response, Result, Session};
use serde_json::json;

const WAIT: Duration = Duration::from_secs(5);

/// Holds fetches of gated paths until they are released.
struct GatedSource {
    inner: MemorySource,
    gated: Mutex<HashSet<String>>,
    opened: Condvar,
}

impl GatedSource {
    fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            gated: Mutex::new(HashSet::new()),
            opened: Condvar::new(),
        }
    }

    fn close(&self, path: &str) {
        self.gated.lock().unwrap().insert(path.to_string());
    }

    fn open(&self, path: &str) {
        self.gated.lock().unwrap().remove(path);
        self.opened.notify_all();
    }
}

impl ArtifactSource for GatedSource {
    fn fetch(&self, path: &str) -> Result<Response> {
        let mut gated = self.gated.lock().unwrap();
        while gated.contains(path) {
            gated = self.opened.wait(gated).unwrap();
        }
        drop(gated);
        self.inner.fetch(path)
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

fn store() -> MemorySource {
    let points = |n: usize| {
        json!({ "points": (0..n).map(|i| json!({"x": i, "y": i})).collect::<Vec<_>>() })
    };
    let gmm = |labels: Vec<i32>| {
        json!({
            "labels": labels,
            "means": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}],
            "probabilities": [],
            "covariances": [{"type": "spherical", "variance": 0.5}],
            "log_likelihood": -1.234,
            "weights": [0.5, 0.5]
        })
    };
    MemorySource::new()
        .with_json("/datasets/blobs.json", &points(3))
        .with_json("/datasets/moons.json", &points(4))
        .with_json("/clustering-results/gmm/blobs_k3_full.json", &gmm(vec![0, 1, 1]))
        .with_json("/clustering-results/gmm/blobs_k2_tied.json", &gmm(vec![0, 0, 1]))
        .with_json("/clustering-results/gmm/moons_k3_full.json", &gmm(vec![0, 1]))
}

#[test]
fn superseded_dataset_load_is_discarded() {
    let gated = Arc::new(GatedSource::new(store()));
    gated.close("/datasets/blobs.json");
    let mut session = Session::new(gated.clone(), Algorithm::Gmm);

    session.select_dataset("blobs");
    session.select_dataset("moons");
    assert!(session.wait(WAIT));
    assert_eq!(session.dataset().unwrap().id, "moons");

    gated.open("/datasets/blobs.json");
    std::thread::sleep(Duration::from_millis(50));
    assert!(!session.poll());
    assert_eq!(session.dataset().unwrap().id, "moons");
    assert_eq!(session.phase(), Phase::DatasetReady);
}

#[test]
fn parameter_change_during_fetch_discards_completion() {
    let gated = Arc::new(GatedSource::new(store()));
    let mut session = Session::new(gated.clone(), Algorithm::Gmm);
    session.select_dataset("blobs");
    assert!(session.wait(WAIT));

    gated.close("/clustering-results/gmm/blobs_k3_full.json");
    assert!(session.run());
    assert_eq!(session.phase(), Phase::ResultLoading);
    assert!(!session.run());

    session.set_param("covariance_type", "tied").unwrap();
    session.set_param("n_components", "2").unwrap();
    assert_eq!(session.phase(), Phase::DatasetReady);
    assert!(!session.is_loading());

    gated.open("/clustering-results/gmm/blobs_k3_full.json");
    std::thread::sleep(Duration::from_millis(50));
    session.poll();
    assert!(session.result().is_none());

    assert!(session.run());
    assert!(session.wait(WAIT));
    let result = session.result().unwrap();
    assert_eq!(
        result.params,
        AlgorithmParams::Gmm(GmmParams {
            n_components: 2,
            covariance_type: clusterview_core::CovarianceType::Tied,
        })
    );
    assert_eq!(
        session.plot_model().unwrap().title,
        "blobs - GMM (k=2, tied)"
    );
}

#[test]
fn dataset_change_clears_result() {
    let mut session = Session::new(Arc::new(store()), Algorithm::Gmm);
    session.select_dataset("blobs");
    session.wait(WAIT);
    session.run();
    session.wait(WAIT);
    assert_eq!(session.phase(), Phase::ResultReady);
    let summary = session.summary().unwrap();
    assert_eq!(summary[0].1, "Fit 3 Gaussian components");
    assert_eq!(summary[2].1, "-1.23");

    session.select_dataset("moons");
    assert_eq!(session.phase(), Phase::DatasetLoading);
    assert!(session.result().is_none());
    assert!(session.plot_model().is_none());
    session.wait(WAIT);
    assert_eq!(session.phase(), Phase::DatasetReady);
}

#[test]
fn label_mismatch_surfaces_as_result_error() {
    let mut session = Session::new(Arc::new(store()), Algorithm::Gmm);
    session.select_dataset("moons");
    session.wait(WAIT);
    session.run();
    session.wait(WAIT);

    assert_eq!(session.phase(), Phase::ResultError);
    assert!(matches!(
        session.error(),
        Some(clusterview_io::Error::LabelCountMismatch {
            expected: 4,
            found: 2,
            ..
        })
    ));
}

#[test]
fn switching_source_reloads_dataset() {
    let mut session = Session::new(Arc::new(MemorySource::new()), Algorithm::Gmm);
    session.select_dataset("blobs");
    session.wait(WAIT);
    assert_eq!(session.phase(), Phase::DatasetError);

    session.set_source(Arc::new(store()));
    assert_eq!(session.phase(), Phase::DatasetLoading);
    session.wait(WAIT);
    assert_eq!(session.dataset().unwrap().len(), 3);
}
