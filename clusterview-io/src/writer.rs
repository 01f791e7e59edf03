//! CSV export of labelled points.

use crate::{Error, Result};
use clusterview_core::{ClusteringArtifact, Dataset};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for labelled dataset exports.
///
/// Writes one row per point, joined with the cluster label of the result
/// shown for it.
pub struct DataFileWriter<W: Write = BufWriter<File>> {
    writer: W,
}

impl DataFileWriter {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DataFileWriter<W> {
    /// Wraps an arbitrary sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes points as CSV with header `x,y,cluster`.
    ///
    /// Without a result the `cluster` column carries the dataset's own
    /// ground-truth assignment when present, and is empty otherwise.
    ///
    /// # Errors
    /// Returns [`Error::LabelCountMismatch`] if the result does not label
    /// every point, or [`Error::Io`] on write failure.
    pub fn write_points_csv(
        &mut self,
        dataset: &Dataset,
        result: Option<&dyn ClusteringArtifact>,
    ) -> Result<()> {
        if let Some(labels) = result.map(|r| r.labels()) {
            if labels.len() != dataset.len() {
                return Err(Error::LabelCountMismatch {
                    dataset: dataset.id.clone(),
                    expected: dataset.len(),
                    found: labels.len(),
                });
            }
        }

        writeln!(self.writer, "x,y,cluster")?;
        let labels = result.map(|r| r.labels());
        for (i, p) in dataset.points.iter().enumerate() {
            let cluster = match labels.and_then(|l| l.get(i)) {
                Some(label) => label.to_string(),
                None => p.cluster.map(|c| c.to_string()).unwrap_or_default(),
            };
            writeln!(self.writer, "{},{},{cluster}", p.x, p.y)?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterview_core::{DataPoint, DbscanResult};
    use tempfile::NamedTempFile;

    fn dataset() -> Dataset {
        let mut labelled = DataPoint::new(10.3, 20.7);
        labelled.cluster = Some(2);
        Dataset {
            id: "blobs".to_string(),
            name: "Gaussian Blobs".to_string(),
            points: vec![DataPoint::new(1.5, 2.5), labelled],
            description: None,
        }
    }

    fn result(labels: Vec<i32>) -> DbscanResult {
        DbscanResult {
            dataset: None,
            algorithm: None,
            params: None,
            noise_points: labels.iter().filter(|&&l| l == -1).count(),
            labels,
        }
    }

    #[test]
    fn test_write_points_csv_with_result() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = DataFileWriter::create(file.path()).unwrap();

        writer
            .write_points_csv(&dataset(), Some(&result(vec![0, -1]) as &dyn ClusteringArtifact))
            .unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "x,y,cluster\n1.5,2.5,0\n10.3,20.7,-1\n");
    }

    #[test]
    fn test_write_points_csv_without_result() {
        let mut writer = DataFileWriter::new(Vec::new());
        writer.write_points_csv(&dataset(), None).unwrap();

        let content = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(content, "x,y,cluster\n1.5,2.5,\n10.3,20.7,2\n");
    }

    #[test]
    fn test_write_points_csv_rejects_short_labels() {
        let mut writer = DataFileWriter::new(Vec::new());
        let err = writer
            .write_points_csv(&dataset(), Some(&result(vec![0]) as &dyn ClusteringArtifact))
            .unwrap_err();
        assert!(matches!(err, Error::LabelCountMismatch { found: 1, .. }));
        assert!(writer.into_inner().is_empty());
    }
}
