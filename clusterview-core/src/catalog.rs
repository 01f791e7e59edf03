//! Fixed dataset catalog exposed to the selectors.

use crate::{Error, Result};

/// Dataset identifiers offered by the viewer.
pub const DATASETS: [&str; 4] = ["circles", "blobs", "moons", "aniso"];

/// Dataset selected when a page opens.
pub const DEFAULT_DATASET: &str = "blobs";

/// Root directory of dataset documents.
pub const DATASETS_ROOT: &str = "/datasets";

/// Path of the dataset document for `name`.
#[must_use]
pub fn dataset_path(name: &str) -> String {
    format!("{DATASETS_ROOT}/{name}.json")
}

/// Returns the list of available datasets.
#[must_use]
pub fn available_datasets() -> &'static [&'static str] {
    &DATASETS
}

/// Checks that `name` is part of the catalog.
///
/// # Errors
/// Returns [`Error::UnknownDataset`] for names outside the catalog.
pub fn require_known(name: &str) -> Result<&'static str> {
    DATASETS
        .iter()
        .copied()
        .find(|d| *d == name)
        .ok_or_else(|| Error::UnknownDataset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_catalog() {
        assert!(available_datasets().contains(&DEFAULT_DATASET));
    }

    #[test]
    fn test_dataset_path() {
        assert_eq!(dataset_path("circles"), "/datasets/circles.json");
    }

    #[test]
    fn test_require_known() {
        assert_eq!(require_known("moons").unwrap(), "moons");
        assert_eq!(
            require_known("random"),
            Err(Error::UnknownDataset("random".to_string()))
        );
    }
}
