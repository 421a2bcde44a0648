//! The fixed reference dataset a partition is built from

use log::{debug, info};

use crate::error::{Error, Result};
use crate::source::PointSource;

/// Progress cadence when draining a source
const PROGRESS_EVERY: usize = 25_000;

/// A fixed collection of `len` points of `dimension` doubles each
///
/// Coordinates are stored row-major, so [`ReferenceDataset::point`]
/// returns a contiguous slice. The dataset is immutable once the
/// partition is built; the only mutation is the truncation performed
/// before construction so the point count divides evenly into bins.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    data: Vec<f64>,
    dimension: usize,
}

impl ReferenceDataset {
    /// Create a dataset from a flat row-major buffer
    pub fn from_rows(flat: &[f64], dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidParameter(
                "dimension must be at least 1".to_string(),
            ));
        }
        if flat.len() % dimension != 0 {
            return Err(Error::size_mismatch(
                (flat.len() / dimension) * dimension,
                flat.len(),
                "reference buffer",
            ));
        }
        Ok(Self {
            data: flat.to_vec(),
            dimension,
        })
    }

    /// Create a dataset by draining a point source
    ///
    /// Reads at most `cap` points when a cap is given, otherwise the
    /// whole source. Per-point weights are ignored here; weights only
    /// matter during the fill pass.
    pub fn from_source<S: PointSource>(mut source: S, cap: Option<usize>) -> Result<Self> {
        let dimension = source.dimension();
        if dimension == 0 {
            return Err(Error::InvalidParameter(
                "source dimension must be at least 1".to_string(),
            ));
        }
        let mut data = Vec::new();
        let mut point = vec![0.0; dimension];
        let mut read = 0usize;
        while cap.map_or(true, |cap| read < cap) {
            match source.next_into(&mut point)? {
                Some(_weight) => {
                    data.extend_from_slice(&point);
                    read += 1;
                    if read % PROGRESS_EVERY == 0 {
                        debug!("acquired {read} reference points");
                    }
                }
                None => break,
            }
        }
        Ok(Self { data, dimension })
    }

    /// Truncate so the point count is an exact multiple of `numberofbins`
    ///
    /// Returns the resulting entries-per-bin. Remainder points are
    /// discarded from the tail; this is the documented policy, not an
    /// error. Fails if `numberofbins` is zero or exceeds the number of
    /// points available.
    pub fn truncate_to_multiple_of(&mut self, numberofbins: usize) -> Result<usize> {
        if numberofbins == 0 {
            return Err(Error::InvalidParameter(
                "numberofbins must be at least 1".to_string(),
            ));
        }
        let entries_per_bin = self.len() / numberofbins;
        if entries_per_bin == 0 {
            return Err(Error::InsufficientData {
                expected: numberofbins,
                actual: self.len(),
            });
        }
        let datasize = entries_per_bin * numberofbins;
        self.data.truncate(datasize * self.dimension);
        info!("number of bins: {numberofbins}");
        info!("entries/bin:    {entries_per_bin}");
        info!("data size:      {datasize}");
        Ok(entries_per_bin)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Whether the dataset holds no points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Coordinates per point
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Coordinates of point `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn point(&self, i: usize) -> &[f64] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over points in original order
    pub fn points(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    #[test]
    fn test_from_rows_point_accessor() {
        let dataset = ReferenceDataset::from_rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dimension(), 3);
        assert_eq!(dataset.point(0), &[1.0, 2.0, 3.0]);
        assert_eq!(dataset.point(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_buffer() {
        assert!(ReferenceDataset::from_rows(&[1.0, 2.0, 3.0], 2).is_err());
        assert!(ReferenceDataset::from_rows(&[1.0], 0).is_err());
    }

    #[test]
    fn test_truncation_discards_tail_remainder() {
        let flat: Vec<f64> = (0..10).map(f64::from).collect();
        let mut dataset = ReferenceDataset::from_rows(&flat, 1).unwrap();
        let entries_per_bin = dataset.truncate_to_multiple_of(3).unwrap();
        assert_eq!(entries_per_bin, 3);
        assert_eq!(dataset.len(), 9);
        assert_eq!(dataset.point(8), &[8.0]);
    }

    #[test]
    fn test_truncation_preconditions() {
        let mut dataset = ReferenceDataset::from_rows(&[1.0, 2.0], 1).unwrap();
        assert!(matches!(
            dataset.truncate_to_multiple_of(0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            dataset.truncate_to_multiple_of(5),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_from_source_honors_cap() {
        let flat: Vec<f64> = (0..20).map(f64::from).collect();
        let source = SliceSource::new(&flat, 2).unwrap();
        let dataset = ReferenceDataset::from_source(source, Some(7)).unwrap();
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.point(6), &[12.0, 13.0]);
    }

    #[test]
    fn test_from_source_cap_beyond_available_reads_all() {
        let flat: Vec<f64> = (0..6).map(f64::from).collect();
        let source = SliceSource::new(&flat, 1).unwrap();
        let dataset = ReferenceDataset::from_source(source, Some(100)).unwrap();
        assert_eq!(dataset.len(), 6);
    }
}
