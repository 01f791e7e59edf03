//! Per-algorithm selection session.
//!
//! A [`Session`] owns the dataset and parameter selection of one algorithm
//! page. Fetches run on background threads and report back over a channel;
//! the owning thread applies them with [`Session::poll`] or
//! [`Session::wait`].
//!
//! Every fetch carries a generation number and a cancel flag. Changing the
//! selection cancels the fetches it supersedes, and a superseded completion
//! that still arrives is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clusterview_core::{
    Algorithm, AlgorithmParams, Dataset, PlotModel, ResultArtifact, DEFAULT_DATASET,
};
use log::{debug, warn};

use crate::source::ArtifactSource;
use crate::{dataset::load_dataset, retrieve::fetch_result_for};
use crate::{Error, Result};

/// Where a session is in its load/run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing selected yet, or a dataset error was dismissed.
    #[default]
    Idle,
    /// Dataset fetch in flight.
    DatasetLoading,
    /// Dataset shown, no result.
    DatasetReady,
    /// Dataset fetch failed.
    DatasetError,
    /// Result fetch in flight.
    ResultLoading,
    /// Dataset and result shown.
    ResultReady,
    /// Result fetch failed.
    ResultError,
}

impl Phase {
    /// Returns true while a fetch is in flight.
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Phase::DatasetLoading | Phase::ResultLoading)
    }
}

/// A result together with the parameters it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedResult {
    /// Parameters at the time of the run.
    pub params: AlgorithmParams,
    /// Decoded artifact.
    pub artifact: ResultArtifact,
}

enum Completion {
    Dataset {
        generation: u64,
        outcome: Result<Dataset>,
    },
    Result {
        generation: u64,
        outcome: Result<LoadedResult>,
    },
}

struct Ticket {
    generation: u64,
    cancel: Arc<AtomicBool>,
}

impl Ticket {
    fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }
}

/// Selection state of one algorithm page.
pub struct Session {
    source: Arc<dyn ArtifactSource>,
    algorithm: Algorithm,
    dataset_name: String,
    params: AlgorithmParams,
    phase: Phase,
    dataset: Option<Arc<Dataset>>,
    result: Option<LoadedResult>,
    error: Option<Error>,
    generation: u64,
    dataset_ticket: Option<Ticket>,
    result_ticket: Option<Ticket>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Session {
    /// Creates an idle session with the default dataset and parameters.
    #[must_use]
    pub fn new(source: Arc<dyn ArtifactSource>, algorithm: Algorithm) -> Self {
        let (tx, rx) = channel();
        Self {
            source,
            algorithm,
            dataset_name: DEFAULT_DATASET.to_string(),
            params: algorithm.default_params(),
            phase: Phase::Idle,
            dataset: None,
            result: None,
            error: None,
            generation: 0,
            dataset_ticket: None,
            result_ticket: None,
            tx,
            rx,
        }
    }

    /// Algorithm of this page.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Selected dataset identifier.
    #[must_use]
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    /// Selected parameters.
    #[must_use]
    pub fn params(&self) -> &AlgorithmParams {
        &self.params
    }

    /// Loaded dataset, if any.
    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_deref()
    }

    /// Result currently shown, if any.
    #[must_use]
    pub fn result(&self) -> Option<&LoadedResult> {
        self.result.as_ref()
    }

    /// Error waiting to be dismissed, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Store this session reads from.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn ArtifactSource> {
        &self.source
    }

    /// Current selection generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches to another store and reloads the selected dataset.
    pub fn set_source(&mut self, source: Arc<dyn ArtifactSource>) {
        self.source = source;
        let name = self.dataset_name.clone();
        self.select_dataset(&name);
    }

    /// Selects a dataset and starts loading it.
    ///
    /// Any dataset, result or error shown so far is discarded and in-flight
    /// fetches are cancelled.
    pub fn select_dataset(&mut self, name: &str) {
        self.cancel_all();
        self.dataset_name = name.to_string();
        self.dataset = None;
        self.result = None;
        self.error = None;
        self.phase = Phase::DatasetLoading;

        let generation = self.next_generation();
        let cancel = Arc::new(AtomicBool::new(false));
        self.dataset_ticket = Some(Ticket {
            generation,
            cancel: Arc::clone(&cancel),
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let name = name.to_string();
        debug!("{}: loading dataset {name} (generation {generation})", self.algorithm);
        thread::spawn(move || {
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let outcome = load_dataset(source.as_ref(), &name);
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let _ = tx.send(Completion::Dataset {
                generation,
                outcome,
            });
        });
    }

    /// Replaces the parameter selection.
    ///
    /// A result shown, being fetched or errored is discarded and the session
    /// returns to [`Phase::DatasetReady`]. Selecting the current parameters
    /// again changes nothing.
    ///
    /// # Errors
    /// Returns [`Error::Core`] if `params` belong to another algorithm.
    pub fn set_params(&mut self, params: AlgorithmParams) -> Result<()> {
        if params.algorithm() != self.algorithm {
            return Err(clusterview_core::Error::AlgorithmMismatch {
                expected: self.algorithm.display_name(),
                found: params.algorithm().display_name(),
            }
            .into());
        }
        if params == self.params {
            return Ok(());
        }
        self.params = params;
        self.next_generation();
        self.discard_result();
        Ok(())
    }

    /// Sets one parameter from its selector value.
    ///
    /// # Errors
    /// Returns [`Error::Core`] for unknown keys or values outside the options.
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<()> {
        let params = self.params.with(key, value)?;
        self.set_params(params)
    }

    /// Starts fetching the result for the current selection.
    ///
    /// Returns false when there is no loaded dataset or a fetch is already
    /// in flight.
    pub fn run(&mut self) -> bool {
        let Some(dataset) = self.dataset.clone() else {
            return false;
        };
        if self.is_loading() {
            return false;
        }
        self.result = None;
        self.error = None;
        self.phase = Phase::ResultLoading;

        let generation = self.next_generation();
        let cancel = Arc::new(AtomicBool::new(false));
        self.result_ticket = Some(Ticket {
            generation,
            cancel: Arc::clone(&cancel),
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let params = self.params;
        debug!(
            "{}: fetching result for {} with {} (generation {generation})",
            self.algorithm,
            dataset.id,
            params.describe()
        );
        thread::spawn(move || {
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let outcome = fetch_result_for(source.as_ref(), &dataset, &params)
                .map(|artifact| LoadedResult { params, artifact });
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let _ = tx.send(Completion::Result {
                generation,
                outcome,
            });
        });
        true
    }

    /// Applies every completion that has arrived so far.
    ///
    /// Returns true if the session changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Blocks until no fetch is in flight or `timeout` elapses.
    ///
    /// Returns false on timeout.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll();
        while self.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    /// Dismisses the error message without retrying.
    ///
    /// A result error returns to [`Phase::DatasetReady`], a dataset error to
    /// [`Phase::Idle`].
    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.phase = match self.phase {
            Phase::ResultError => Phase::DatasetReady,
            Phase::DatasetError => Phase::Idle,
            other => other,
        };
    }

    /// Plot model of the dataset and the result shown, if a dataset is loaded.
    #[must_use]
    pub fn plot_model(&self) -> Option<PlotModel> {
        let dataset = self.dataset()?;
        Some(PlotModel::for_dataset(
            dataset,
            self.result.as_ref().map(|r| (&r.params, &r.artifact)),
        ))
    }

    /// Info card lines for the result shown, if any.
    #[must_use]
    pub fn summary(&self) -> Option<Vec<(&'static str, String)>> {
        let dataset = self.dataset()?;
        let result = self.result.as_ref()?;
        Some(result.artifact.summary(&result.params, dataset.len()))
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn cancel_all(&mut self) {
        if let Some(ticket) = self.dataset_ticket.take() {
            ticket.cancel();
        }
        if let Some(ticket) = self.result_ticket.take() {
            ticket.cancel();
        }
    }

    fn discard_result(&mut self) {
        if let Some(ticket) = self.result_ticket.take() {
            ticket.cancel();
        }
        self.result = None;
        if matches!(
            self.phase,
            Phase::ResultLoading | Phase::ResultReady | Phase::ResultError
        ) {
            self.error = None;
            self.phase = Phase::DatasetReady;
        }
    }

    fn take_current(slot: &mut Option<Ticket>, generation: u64) -> bool {
        if slot.as_ref().is_some_and(|t| t.generation == generation) {
            *slot = None;
            true
        } else {
            false
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Dataset {
                generation,
                outcome,
            } => {
                if !Self::take_current(&mut self.dataset_ticket, generation) {
                    warn!(
                        "{}: discarding stale dataset completion (generation {generation})",
                        self.algorithm
                    );
                    return false;
                }
                match outcome {
                    Ok(dataset) => {
                        self.dataset = Some(Arc::new(dataset));
                        self.phase = Phase::DatasetReady;
                    }
                    Err(e) => {
                        self.error = Some(e);
                        self.phase = Phase::DatasetError;
                    }
                }
            }
            Completion::Result {
                generation,
                outcome,
            } => {
                if !Self::take_current(&mut self.result_ticket, generation) {
                    warn!(
                        "{}: discarding stale result completion (generation {generation})",
                        self.algorithm
                    );
                    return false;
                }
                match outcome {
                    Ok(result) => {
                        self.result = Some(result);
                        self.phase = Phase::ResultReady;
                    }
                    Err(e) => {
                        self.error = Some(e);
                        self.phase = Phase::ResultError;
                    }
                }
            }
        }
        true
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use clusterview_core::{DbscanParams, KMeansParams};
    use serde_json::json;

    const WAIT: Duration = Duration::from_secs(5);

    fn source() -> Arc<dyn ArtifactSource> {
        Arc::new(
            MemorySource::new()
                .with_json(
                    "/datasets/blobs.json",
                    &json!({"name": "Gaussian Blobs", "points": [
                        {"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 1.0}, {"x": 5.0, "y": 5.0}
                    ]}),
                )
                .with_json(
                    "/clustering-results/kmeans/blobs_k3.json",
                    &json!({
                        "labels": [0, 0, 1],
                        "centroids": [{"x": 0.5, "y": 0.5}, {"x": 5.0, "y": 5.0}],
                        "inertia": 1.0
                    }),
                ),
        )
    }

    fn ready_session() -> Session {
        let mut session = Session::new(source(), Algorithm::KMeans);
        session.select_dataset("blobs");
        assert!(session.wait(WAIT));
        assert_eq!(session.phase(), Phase::DatasetReady);
        session
    }

    #[test]
    fn test_new_session_is_idle_with_defaults() {
        let session = Session::new(source(), Algorithm::Dbscan);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.dataset_name(), "blobs");
        assert_eq!(
            session.params(),
            &AlgorithmParams::Dbscan(DbscanParams::default())
        );
        assert!(session.plot_model().is_none());
    }

    #[test]
    fn test_run_requires_dataset() {
        let mut session = Session::new(source(), Algorithm::KMeans);
        assert!(!session.run());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_load_then_run() {
        let mut session = ready_session();
        assert_eq!(session.dataset().unwrap().len(), 3);
        assert_eq!(
            session.plot_model().unwrap().title,
            "Gaussian Blobs Dataset"
        );

        assert!(session.run());
        assert!(session.wait(WAIT));
        assert_eq!(session.phase(), Phase::ResultReady);
        assert_eq!(
            session.plot_model().unwrap().title,
            "Gaussian Blobs - K-Means (k=3)"
        );
        let summary = session.summary().unwrap();
        assert_eq!(summary[0].1, "Clustered into 3 groups");
    }

    #[test]
    fn test_param_change_clears_result() {
        let mut session = ready_session();
        session.run();
        session.wait(WAIT);
        assert!(session.result().is_some());

        session.set_param("k", "4").unwrap();
        assert_eq!(session.phase(), Phase::DatasetReady);
        assert!(session.result().is_none());
        assert_eq!(session.params(), &AlgorithmParams::KMeans(KMeansParams { k: 4 }));
    }

    #[test]
    fn test_same_params_keep_result() {
        let mut session = ready_session();
        session.run();
        session.wait(WAIT);

        session.set_param("k", "3").unwrap();
        assert_eq!(session.phase(), Phase::ResultReady);
    }

    #[test]
    fn test_missing_result_then_dismiss() {
        let mut session = ready_session();
        session.set_param("k", "5").unwrap();
        session.run();
        session.wait(WAIT);

        assert_eq!(session.phase(), Phase::ResultError);
        assert_eq!(
            session.error().unwrap().to_string(),
            "No results found for blobs with k=5"
        );

        session.dismiss_error();
        assert_eq!(session.phase(), Phase::DatasetReady);
        assert!(session.error().is_none());
        assert!(session.dataset().is_some());
    }

    #[test]
    fn test_dataset_error_dismisses_to_idle() {
        let mut session = Session::new(source(), Algorithm::KMeans);
        session.select_dataset("moons");
        session.wait(WAIT);
        assert_eq!(session.phase(), Phase::DatasetError);

        session.dismiss_error();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_params_of_other_algorithm_rejected() {
        let mut session = Session::new(source(), Algorithm::KMeans);
        let err = session
            .set_params(AlgorithmParams::Dbscan(DbscanParams::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(clusterview_core::Error::AlgorithmMismatch { .. })
        ));
    }
}
