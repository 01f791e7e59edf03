//! Static stores that datasets and result artifacts are read from.
//!
//! All paths are absolute below the store root, e.g. `/datasets/blobs.json`
//! or `/clustering-results/kmeans/blobs_k3.json`. A source reports missing
//! files as a non-2xx [`Response`] and reserves `Err` for transport faults.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::{Error, Result};

/// Response of a source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP-style status code.
    pub status: u16,
    /// Reason phrase, possibly empty.
    pub reason: String,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a `200 OK` response.
    #[must_use]
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            body,
        }
    }

    /// Creates a `404 Not Found` response.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: 404,
            reason: "Not Found".to_string(),
            body: Vec::new(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status line, e.g. `404 Not Found`.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

/// A read-only store of datasets and artifacts.
pub trait ArtifactSource: Send + Sync {
    /// Fetches `path` from the store.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when no response could be obtained.
    fn fetch(&self, path: &str) -> Result<Response>;

    /// Human-readable location of the store.
    fn describe(&self) -> String;
}

impl<S: ArtifactSource + ?Sized> ArtifactSource for Arc<S> {
    fn fetch(&self, path: &str) -> Result<Response> {
        (**self).fetch(path)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Store backed by a local directory laid out like the web root.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Opens a directory store.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSource`] if `root` is not a directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidSource(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ArtifactSource for DirectorySource {
    fn fetch(&self, path: &str) -> Result<Response> {
        let Some(file) = self.resolve(path) else {
            return Ok(Response {
                status: 400,
                reason: "Bad Request".to_string(),
                body: Vec::new(),
            });
        };
        debug!("reading {}", file.display());
        match std::fs::read(&file) {
            Ok(body) => Ok(Response::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Response::not_found()),
            Err(e) => Err(Error::Transport {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Store held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raw document at `path`.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    /// Adds a JSON document at `path`.
    #[must_use]
    pub fn with_json(self, path: impl Into<String>, value: &serde_json::Value) -> Self {
        self.with_document(path, value.to_string())
    }

    /// Adds or replaces a raw document at `path`.
    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), body.into());
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArtifactSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<Response> {
        Ok(self
            .entries
            .get(path)
            .map_or_else(Response::not_found, |body| Response::ok(body.clone())))
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.entries.len())
    }
}

/// Store served over HTTP, e.g. the static web root of the viewer.
pub struct HttpSource {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Creates an HTTP store rooted at `base`.
    ///
    /// `timeout` of `None` waits indefinitely for each request.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSource`] if the base URL is not http(s) or the
    /// client cannot be built.
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self> {
        if !is_http(base) {
            return Err(Error::InvalidSource(format!("not an http(s) URL: {base}")));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidSource(e.to_string()))?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn transport(path: &str, e: &reqwest::Error) -> Error {
        Error::Transport {
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource").field("base", &self.base).finish()
    }
}

impl ArtifactSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<Response> {
        let url = format!("{}{path}", self.base);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Self::transport(path, &e))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| Self::transport(path, &e))?
            .to_vec();
        Ok(Response {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    fn describe(&self) -> String {
        self.base.clone()
    }
}

fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Where to read datasets and artifacts from.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// `http(s)://` base URL or local directory.
    pub location: String,
    /// Per-request timeout for HTTP sources (`None` = wait indefinitely).
    pub timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "public".to_string(),
            timeout: None,
        }
    }
}

impl SourceConfig {
    /// Creates a configuration for `location`.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns true when the location is an HTTP URL.
    #[must_use]
    pub fn is_http(&self) -> bool {
        is_http(&self.location)
    }

    /// Opens the configured store.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSource`] if the location cannot be used.
    pub fn open(&self) -> Result<Arc<dyn ArtifactSource>> {
        if self.is_http() {
            Ok(Arc::new(HttpSource::new(&self.location, self.timeout)?))
        } else {
            Ok(Arc::new(DirectorySource::open(&self.location)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_source_reads_and_reports_missing() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("datasets")).unwrap();
        std::fs::write(dir.path().join("datasets/blobs.json"), b"{}").unwrap();

        let source = DirectorySource::open(dir.path()).unwrap();
        let found = source.fetch("/datasets/blobs.json").unwrap();
        assert!(found.is_success());
        assert_eq!(found.body, b"{}");

        let missing = source.fetch("/datasets/moons.json").unwrap();
        assert_eq!(missing.status, 404);
        assert_eq!(missing.status_line(), "404 Not Found");
    }

    #[test]
    fn test_directory_source_rejects_parent_components() {
        let dir = tempdir().unwrap();
        let source = DirectorySource::open(dir.path()).unwrap();
        let response = source.fetch("/../etc/passwd").unwrap();
        assert_eq!(response.status, 400);
    }

    #[test]
    fn test_directory_source_requires_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            DirectorySource::open(missing),
            Err(Error::InvalidSource(_))
        ));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with_document("/a.json", "[]");
        assert_eq!(source.len(), 1);
        assert!(source.fetch("/a.json").unwrap().is_success());
        assert_eq!(source.fetch("/b.json").unwrap().status, 404);
    }

    #[test]
    fn test_source_config_selects_backend() {
        assert!(SourceConfig::new("http://localhost:5173").is_http());
        assert!(SourceConfig::new("https://example.org/app").is_http());
        assert!(!SourceConfig::default().is_http());

        let dir = tempdir().unwrap();
        let source = SourceConfig::new(dir.path().to_string_lossy())
            .open()
            .unwrap();
        assert_eq!(source.describe(), dir.path().display().to_string());
    }

    #[test]
    fn test_http_source_rejects_non_http() {
        assert!(matches!(
            HttpSource::new("ftp://example.org", None),
            Err(Error::InvalidSource(_))
        ));
    }
}
