//! Dataset loading and validation.

use clusterview_core::{dataset_path, DataPoint, Dataset};
use log::{debug, error, info};
use serde_json::{Map, Value};

use crate::source::ArtifactSource;
use crate::{Error, Result};

/// Fetches `/datasets/<name>.json` from `source` and validates it.
///
/// The whole load fails on the first bad point; nothing partial is returned.
///
/// # Errors
/// - [`Error::EmptyDatasetName`] for an empty `name` (nothing is fetched)
/// - [`Error::DatasetFetch`] for a non-2xx response or a transport fault
/// - [`Error::DatasetShape`] if the body is not JSON or lacks a `points` array
/// - [`Error::DatasetPoint`] for the first point without numeric `x`/`y`
pub fn load_dataset(source: &dyn ArtifactSource, name: &str) -> Result<Dataset> {
    if name.is_empty() {
        return Err(Error::EmptyDatasetName);
    }
    let path = dataset_path(name);
    debug!("loading dataset {name} from {path}");

    let response = source.fetch(&path).map_err(|e| {
        let err = Error::DatasetFetch {
            name: name.to_string(),
            status: None,
            detail: e.to_string(),
        };
        error!("{err}");
        err
    })?;
    if !response.is_success() {
        let err = Error::DatasetFetch {
            name: name.to_string(),
            status: Some(response.status),
            detail: response.status_line(),
        };
        error!("{err}");
        return Err(err);
    }

    let document: Value =
        serde_json::from_slice(&response.body).map_err(|e| Error::DatasetShape {
            name: name.to_string(),
            reason: format!("body is not valid JSON: {e}"),
        })?;
    let dataset = parse_dataset(name, &document)?;
    info!(
        "Loaded dataset \"{}\" with {} points",
        dataset.name,
        dataset.len()
    );
    Ok(dataset)
}

/// Validates a decoded dataset document requested as `name`.
///
/// # Errors
/// Returns [`Error::DatasetShape`] or [`Error::DatasetPoint`], see [`load_dataset`].
pub fn parse_dataset(name: &str, document: &Value) -> Result<Dataset> {
    let shape = |reason: &str| Error::DatasetShape {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    let object = document
        .as_object()
        .ok_or_else(|| shape("document is not a JSON object"))?;
    let raw_points = object
        .get("points")
        .ok_or_else(|| shape("missing \"points\" field"))?
        .as_array()
        .ok_or_else(|| shape("\"points\" is not an array"))?;

    let points = raw_points
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            parse_point(raw).ok_or_else(|| Error::DatasetPoint {
                name: name.to_string(),
                index,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset {
        id: name.to_string(),
        name: non_empty_str(object, "name").unwrap_or(name).to_string(),
        points,
        description: object
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn parse_point(raw: &Value) -> Option<DataPoint> {
    let object = raw.as_object()?;
    let x = object.get("x")?.as_f64()?;
    let y = object.get("y")?.as_f64()?;
    Some(DataPoint {
        x,
        y,
        label: non_empty_str(object, "label").map(str::to_string),
        cluster: object.get("cluster").and_then(Value::as_i64),
    })
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
