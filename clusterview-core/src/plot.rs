//! Scatter plot model built from a dataset and an optional result.
//!
//! The model is renderer-agnostic: it fixes grouping, colours, marker sizes
//! and the title, and leaves drawing to the surface.

use std::collections::BTreeMap;

use crate::artifact::{Centroid, ClusteringArtifact, ResultArtifact, NOISE_LABEL};
use crate::params::AlgorithmParams;
use crate::point::Dataset;

/// Cluster colour cycle (RGB).
pub const PALETTE: [[u8; 3]; 8] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
];

/// Colour of noise points.
pub const NOISE_COLOR: [u8; 3] = [0x66, 0x66, 0x66];

/// Colour of centre markers.
pub const CENTROID_COLOR: [u8; 3] = [0xff, 0x00, 0x00];

/// Marker diameter of centre markers.
pub const CENTROID_SIZE: f32 = 15.0;

/// One group of markers drawn with the same style.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    /// Legend entry.
    pub name: String,
    /// Marker colour (RGB).
    pub color: [u8; 3],
    /// Marker diameter in points.
    pub size: f32,
    /// Marker opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether this series holds noise points.
    pub is_noise: bool,
    /// Point coordinates.
    pub points: Vec<[f64; 2]>,
}

impl ScatterSeries {
    fn cluster(label: i32, color: [u8; 3], points: Vec<[f64; 2]>) -> Self {
        Self {
            name: format!("Cluster {label}"),
            color,
            size: 8.0,
            opacity: 0.7,
            is_noise: false,
            points,
        }
    }

    fn noise(points: Vec<[f64; 2]>) -> Self {
        Self {
            name: "Noise".to_string(),
            color: NOISE_COLOR,
            size: 4.0,
            opacity: 0.5,
            is_noise: true,
            points,
        }
    }

    fn unlabelled(points: Vec<[f64; 2]>) -> Self {
        Self {
            name: "Data Points".to_string(),
            color: PALETTE[0],
            size: 8.0,
            opacity: 0.7,
            is_noise: false,
            points,
        }
    }
}

/// Everything a scatter widget needs to draw one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotModel {
    /// Plot title.
    pub title: String,
    /// Point series, clusters in ascending label order then noise.
    pub series: Vec<ScatterSeries>,
    /// Centre markers.
    pub centroids: Vec<[f64; 2]>,
}

impl PlotModel {
    /// Builds a model from raw arrays.
    ///
    /// Labels are only honoured when there is exactly one per point;
    /// otherwise all points are drawn as a single unlabelled series.
    #[must_use]
    pub fn build(
        points: &[[f64; 2]],
        labels: Option<&[i32]>,
        centroids: Option<&[Centroid]>,
        title: impl Into<String>,
    ) -> Self {
        let series = match labels {
            Some(labels) if labels.len() == points.len() => group_by_label(points, labels),
            _ => vec![ScatterSeries::unlabelled(points.to_vec())],
        };
        let centroids = centroids
            .unwrap_or_default()
            .iter()
            .map(|c| [c.x, c.y])
            .collect();
        Self {
            title: title.into(),
            series,
            centroids,
        }
    }

    /// Builds the model for a dataset and the result currently shown, if any.
    #[must_use]
    pub fn for_dataset(
        dataset: &Dataset,
        result: Option<(&AlgorithmParams, &ResultArtifact)>,
    ) -> Self {
        let points = dataset.coordinates();
        let title = plot_title(&dataset.name, result.map(|(p, _)| p));
        match result {
            Some((_, artifact)) => Self::build(
                &points,
                Some(artifact.labels()),
                artifact.centers(),
                title,
            ),
            None => Self::build(&points, None, None, title),
        }
    }

    /// Whether a legend is worth drawing.
    #[must_use]
    pub fn show_legend(&self) -> bool {
        self.series.len() + usize::from(!self.centroids.is_empty()) > 1
    }
}

fn group_by_label(points: &[[f64; 2]], labels: &[i32]) -> Vec<ScatterSeries> {
    let mut groups: BTreeMap<i32, Vec<[f64; 2]>> = BTreeMap::new();
    for (point, &label) in points.iter().zip(labels) {
        groups.entry(label).or_default().push(*point);
    }

    let noise = groups.remove(&NOISE_LABEL);
    let mut series: Vec<ScatterSeries> = groups
        .into_iter()
        .enumerate()
        .map(|(i, (label, pts))| ScatterSeries::cluster(label, PALETTE[i % PALETTE.len()], pts))
        .collect();
    if let Some(pts) = noise {
        series.push(ScatterSeries::noise(pts));
    }
    series
}

/// Plot title for a dataset, with the algorithm and parameters once a result is shown.
#[must_use]
pub fn plot_title(dataset_name: &str, params: Option<&AlgorithmParams>) -> String {
    match params {
        Some(p) => format!(
            "{dataset_name} - {} ({})",
            p.algorithm().display_name(),
            p.title_label()
        ),
        None => format!("{dataset_name} Dataset"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DbscanResult;
    use crate::params::{DbscanParams, KMeansParams, MeanShiftParams};
    use crate::point::DataPoint;

    fn dataset() -> Dataset {
        Dataset {
            id: "moons".to_string(),
            name: "Two Moons".to_string(),
            points: vec![
                DataPoint::new(0.0, 0.0),
                DataPoint::new(1.0, 1.0),
                DataPoint::new(2.0, 2.0),
                DataPoint::new(3.0, 3.0),
            ],
            description: None,
        }
    }

    #[test]
    fn test_unlabelled_single_series() {
        let model = PlotModel::for_dataset(&dataset(), None);
        assert_eq!(model.title, "Two Moons Dataset");
        assert_eq!(model.series.len(), 1);
        assert_eq!(model.series[0].name, "Data Points");
        assert_eq!(model.series[0].points.len(), 4);
        assert!(!model.show_legend());
    }

    #[test]
    fn test_groups_with_noise_last() {
        let params = AlgorithmParams::Dbscan(DbscanParams::default());
        let artifact = ResultArtifact::Dbscan(DbscanResult {
            dataset: None,
            algorithm: None,
            params: None,
            labels: vec![1, -1, 0, 1],
            noise_points: 1,
        });

        let model = PlotModel::for_dataset(&dataset(), Some((&params, &artifact)));
        assert_eq!(
            model.title,
            "Two Moons - DBSCAN (eps=0.3, min_samples=5)"
        );
        let names: Vec<_> = model.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Cluster 0", "Cluster 1", "Noise"]);
        assert_eq!(model.series[0].color, PALETTE[0]);
        assert_eq!(model.series[1].color, PALETTE[1]);
        assert_eq!(model.series[1].points, vec![[0.0, 0.0], [3.0, 3.0]]);
        assert!(model.series[2].is_noise);
        assert_eq!(model.series[2].color, NOISE_COLOR);
        assert!(model.centroids.is_empty());
    }

    #[test]
    fn test_mismatched_labels_fall_back_to_single_series() {
        let model = PlotModel::build(&[[0.0, 0.0], [1.0, 1.0]], Some(&[0][..]), None, "t");
        assert_eq!(model.series.len(), 1);
        assert_eq!(model.series[0].name, "Data Points");
    }

    #[test]
    fn test_palette_cycles() {
        let points: Vec<[f64; 2]> = (0..10).map(|i| [f64::from(i), 0.0]).collect();
        let labels: Vec<i32> = (0..10).collect();
        let model = PlotModel::build(&points, Some(labels.as_slice()), None, "t");
        assert_eq!(model.series.len(), 10);
        assert_eq!(model.series[8].color, PALETTE[0]);
        assert_eq!(model.series[9].color, PALETTE[1]);
    }

    #[test]
    fn test_centroids_and_titles() {
        let centers = [Centroid::new(0.5, 0.5), Centroid::new(2.5, 2.5)];
        let model = PlotModel::build(&[[0.0, 0.0]], Some(&[0][..]), Some(&centers[..]), "t");
        assert_eq!(model.centroids, vec![[0.5, 0.5], [2.5, 2.5]]);
        assert!(model.show_legend());

        let params = AlgorithmParams::KMeans(KMeansParams { k: 3 });
        assert_eq!(
            plot_title("Gaussian Blobs", Some(&params)),
            "Gaussian Blobs - K-Means (k=3)"
        );
        let params = AlgorithmParams::MeanShift(MeanShiftParams { bandwidth: 1.0 });
        assert_eq!(
            plot_title("Gaussian Blobs", Some(&params)),
            "Gaussian Blobs - Mean Shift (bandwidth=1)"
        );
    }
}
