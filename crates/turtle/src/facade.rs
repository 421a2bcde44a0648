//! The `Turtle` facade: build once, fill many times

use log::debug;
use turtle_core::{Error, PointSource, ReferenceDataset, Result};
use turtle_tree::Partition;

use crate::accumulator::BinAccumulator;
use crate::indexmap::BinIndexMap;

/// Progress cadence during a fill pass
const PROGRESS_EVERY: usize = 25_000;

/// Equal-population binning oracle over a fixed reference dataset
///
/// A `Turtle` owns the whole lifecycle: it acquires reference data,
/// builds the space partition, derives the bin-to-indices map, and
/// then accepts any number of weighted fill passes against the fixed
/// partition. Construction either completes fully or fails; no
/// partially built structure is ever queryable.
#[derive(Debug, Clone)]
pub struct Turtle {
    dataset: ReferenceDataset,
    partition: Partition,
    index_map: BinIndexMap,
    accumulator: BinAccumulator,
    scratch: Vec<f64>,
}

impl Turtle {
    /// Build from a point source, using every available point
    pub fn from_source<S: PointSource>(source: S, numberofbins: usize) -> Result<Self> {
        let dataset = ReferenceDataset::from_source(source, None)?;
        Self::from_dataset(dataset, numberofbins)
    }

    /// Build from a point source, reading at most `numberofpoints`
    ///
    /// When the source holds fewer records than requested, the dataset
    /// is truncated to what is available and then further truncated
    /// down to a multiple of `numberofbins`.
    pub fn from_source_capped<S: PointSource>(
        source: S,
        numberofbins: usize,
        numberofpoints: usize,
    ) -> Result<Self> {
        let dataset = ReferenceDataset::from_source(source, Some(numberofpoints))?;
        Self::from_dataset(dataset, numberofbins)
    }

    /// Build from a flat row-major buffer of
    /// `numberofpoints * numberofvars` doubles
    pub fn from_rows(
        flat: &[f64],
        numberofbins: usize,
        numberofpoints: usize,
        numberofvars: usize,
    ) -> Result<Self> {
        if flat.len() != numberofpoints * numberofvars {
            return Err(Error::size_mismatch(
                numberofpoints * numberofvars,
                flat.len(),
                "flat reference buffer",
            ));
        }
        let dataset = ReferenceDataset::from_rows(flat, numberofvars)?;
        Self::from_dataset(dataset, numberofbins)
    }

    fn from_dataset(mut dataset: ReferenceDataset, numberofbins: usize) -> Result<Self> {
        dataset.truncate_to_multiple_of(numberofbins)?;
        let partition = Partition::build(&dataset, numberofbins)?;
        let index_map = BinIndexMap::derive(&partition, &dataset)?;
        let accumulator = BinAccumulator::new(numberofbins);
        let scratch = vec![0.0; dataset.dimension()];
        Ok(Self {
            dataset,
            partition,
            index_map,
            accumulator,
            scratch,
        })
    }

    /// Drain a point source into the accumulator
    ///
    /// Clears any previously accumulated state first: a batch fill
    /// replaces, it never merges. The source's dimensionality must
    /// match the partition's; that is checked before any state is
    /// touched.
    ///
    /// A source error mid-stream aborts the batch with `Err`. The
    /// prior state is already discarded at that point; deposits made
    /// before the failure remain readable.
    pub fn fill_source<S: PointSource>(&mut self, mut source: S) -> Result<()> {
        if source.dimension() != self.partition.dimension() {
            return Err(Error::dimension_mismatch(
                self.partition.dimension(),
                source.dimension(),
                "fill source",
            ));
        }
        self.accumulator.clear();

        let mut entry = 0usize;
        while let Some(weight) = source.next_into(&mut self.scratch)? {
            if entry % PROGRESS_EVERY == 0 {
                debug!("filled {entry} points");
            }
            let bin = self.partition.resolve_bin(&self.scratch);
            self.accumulator.deposit(bin, weight);
            entry += 1;
        }
        Ok(())
    }

    /// Route a single weighted point into its bin
    ///
    /// A resolved bin id outside the valid range is dropped silently
    /// (the documented leniency for points outside the training
    /// domain); a point of the wrong arity is an error.
    pub fn fill(&mut self, point: &[f64], weight: f64) -> Result<()> {
        if point.len() != self.partition.dimension() {
            return Err(Error::dimension_mismatch(
                self.partition.dimension(),
                point.len(),
                "fill",
            ));
        }
        let bin = self.partition.resolve_bin(point);
        self.accumulator.deposit(bin, weight);
        Ok(())
    }

    /// Route a single point with weight 1
    pub fn fill_unweighted(&mut self, point: &[f64]) -> Result<()> {
        self.fill(point, 1.0)
    }

    /// Reset all counts and variances to zero
    pub fn clear(&mut self) {
        self.accumulator.clear();
    }

    /// Per-bin weighted counts from the current fill pass
    pub fn counts(&self) -> &[f64] {
        self.accumulator.counts()
    }

    /// Per-bin sums of squared weights from the current fill pass
    pub fn variances(&self) -> &[f64] {
        self.accumulator.variances()
    }

    /// Original reference-point indices in bin `bin`
    ///
    /// Empty for an unknown bin id, never an error.
    pub fn indices(&self, bin: usize) -> &[usize] {
        self.index_map.indices(bin)
    }

    /// Coordinates of the reference points in bin `bin`
    ///
    /// Empty for an unknown bin id. Order follows
    /// [`indices`](Self::indices).
    pub fn points_in_bin(&self, bin: usize) -> Vec<&[f64]> {
        self.index_map
            .indices(bin)
            .iter()
            .map(|&i| self.dataset.point(i))
            .collect()
    }

    /// Resolve a point to its bin id without touching any state
    pub fn find_bin(&self, point: &[f64]) -> Result<usize> {
        if point.len() != self.partition.dimension() {
            return Err(Error::dimension_mismatch(
                self.partition.dimension(),
                point.len(),
                "find_bin",
            ));
        }
        Ok(self.partition.resolve_bin(point))
    }

    /// Weighted count divided by bin volume
    ///
    /// Zero for a zero-volume bin; `None` for an unknown bin id.
    pub fn density(&self, bin: usize) -> Option<f64> {
        let volume = self.partition.bin(bin)?.volume();
        let count = self.accumulator.counts()[bin];
        Some(if volume > 0.0 { count / volume } else { 0.0 })
    }

    fn density_unchecked(&self, bin: usize) -> f64 {
        self.density(bin).unwrap_or(0.0)
    }

    /// Id of the bin with the lowest density (lowest id wins ties)
    pub fn min_density_bin(&self) -> usize {
        self.extreme_density_bin(true)
    }

    /// Id of the bin with the highest density (lowest id wins ties)
    pub fn max_density_bin(&self) -> usize {
        self.extreme_density_bin(false)
    }

    fn extreme_density_bin(&self, ascending: bool) -> usize {
        let mut best = 0;
        let mut best_density = self.density_unchecked(0);
        for bin in 1..self.num_bins() {
            let density = self.density_unchecked(bin);
            let better = if ascending {
                density < best_density
            } else {
                density > best_density
            };
            if better {
                best = bin;
                best_density = density;
            }
        }
        best
    }

    /// Bin ids ranked by density
    ///
    /// A ranking view only: bin ids, the index map and the underlying
    /// partition are unaffected. Ties are broken by ascending bin id.
    pub fn sort_by_density(&self, ascending: bool) -> Vec<usize> {
        let mut ids: Vec<usize> = (0..self.num_bins()).collect();
        ids.sort_by(|&a, &b| {
            let ord = self
                .density_unchecked(a)
                .total_cmp(&self.density_unchecked(b));
            let ord = if ascending { ord } else { ord.reverse() };
            ord.then(a.cmp(&b))
        });
        ids
    }

    /// Bin volume, or `None` for an unknown id
    pub fn volume(&self, bin: usize) -> Option<f64> {
        self.partition.bin(bin).map(|b| b.volume())
    }

    /// Bin center, or `None` for an unknown id
    pub fn center(&self, bin: usize) -> Option<Vec<f64>> {
        self.partition.bin(bin).map(|b| b.center())
    }

    /// Bin per-axis widths, or `None` for an unknown id
    pub fn width(&self, bin: usize) -> Option<Vec<f64>> {
        self.partition.bin(bin).map(|b| b.width())
    }

    /// Bin lower edges, or `None` for an unknown id
    pub fn min_edges(&self, bin: usize) -> Option<&[f64]> {
        self.partition.bin(bin).map(|b| b.min_edges())
    }

    /// Bin upper edges, or `None` for an unknown id
    pub fn max_edges(&self, bin: usize) -> Option<&[f64]> {
        self.partition.bin(bin).map(|b| b.max_edges())
    }

    /// Number of bins
    pub fn num_bins(&self) -> usize {
        self.partition.num_bins()
    }

    /// Reference points per bin
    pub fn entries_per_bin(&self) -> usize {
        self.partition.entries_per_bin()
    }

    /// Coordinates per point
    pub fn dimension(&self) -> usize {
        self.partition.dimension()
    }

    /// The underlying partition (e.g. for persistence)
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// The reference dataset the partition was built from
    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eight_point_turtle() -> Turtle {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        Turtle::from_rows(&data, 2, 8, 1).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_wrong_shape() {
        let data = [1.0, 2.0, 3.0];
        assert!(Turtle::from_rows(&data, 1, 2, 2).is_err());
    }

    #[test]
    fn test_fill_dimension_mismatch_is_error() {
        let mut turtle = eight_point_turtle();
        assert!(turtle.fill(&[1.0, 2.0], 1.0).is_err());
        assert!(turtle.find_bin(&[]).is_err());
    }

    #[test]
    fn test_weighted_fill_counts_and_variances() {
        let mut turtle = eight_point_turtle();
        turtle.fill(&[2.5], 3.0).unwrap();
        turtle.fill(&[2.5], 2.0).unwrap();

        assert_relative_eq!(turtle.counts()[0], 5.0);
        assert_relative_eq!(turtle.variances()[0], 13.0);
        assert_eq!(turtle.counts()[1], 0.0);
        assert_eq!(turtle.variances()[1], 0.0);
    }

    #[test]
    fn test_density_ranking() {
        let mut turtle = eight_point_turtle();
        // Both bins have width 3.5; load bin 1 heavier.
        turtle.fill(&[2.0], 1.0).unwrap();
        turtle.fill(&[6.0], 5.0).unwrap();

        assert_eq!(turtle.max_density_bin(), 1);
        assert_eq!(turtle.min_density_bin(), 0);
        assert_eq!(turtle.sort_by_density(true), vec![0, 1]);
        assert_eq!(turtle.sort_by_density(false), vec![1, 0]);
    }

    #[test]
    fn test_geometry_accessors() {
        let turtle = eight_point_turtle();
        assert_eq!(turtle.num_bins(), 2);
        assert_eq!(turtle.entries_per_bin(), 4);
        assert_eq!(turtle.dimension(), 1);

        assert_relative_eq!(turtle.volume(0).unwrap(), 3.5);
        assert_relative_eq!(turtle.center(0).unwrap()[0], 2.75);
        assert_relative_eq!(turtle.width(1).unwrap()[0], 3.5);
        assert_eq!(turtle.min_edges(1).unwrap(), &[4.5]);
        assert_eq!(turtle.max_edges(1).unwrap(), &[8.0]);
        assert!(turtle.volume(2).is_none());
    }

    #[test]
    fn test_unknown_bin_indices_are_empty() {
        let turtle = eight_point_turtle();
        assert!(turtle.indices(17).is_empty());
        assert!(turtle.points_in_bin(17).is_empty());
    }

    #[test]
    fn test_points_in_bin_returns_coordinates() {
        let turtle = eight_point_turtle();
        let points = turtle.points_in_bin(1);
        assert_eq!(points, vec![&[5.0][..], &[6.0], &[7.0], &[8.0]]);
    }
}
