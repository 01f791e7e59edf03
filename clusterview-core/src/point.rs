//! Dataset and point types.

use serde::{Deserialize, Serialize};

/// A 2D coordinate with optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Optional text label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional ground-truth cluster assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<i64>,
}

impl DataPoint {
    /// Creates a point without metadata.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            cluster: None,
        }
    }

    /// Returns the coordinate pair.
    #[inline]
    #[must_use]
    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// A named collection of 2D points used as clustering input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Catalog identifier this dataset was requested by (e.g. `blobs`).
    pub id: String,
    /// Display name (document `name`, or the identifier when absent).
    pub name: String,
    /// Points in document order.
    pub points: Vec<DataPoint>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Dataset {
    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the dataset has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the coordinate pairs in point order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(DataPoint::xy).collect()
    }

    /// Returns the axis-aligned bounds, or `None` for an empty dataset.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(self.points.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// Axis-aligned bounding box of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum x.
    pub min_x: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Minimum y.
    pub min_y: f64,
    /// Maximum y.
    pub max_y: f64,
}
