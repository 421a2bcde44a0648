//! Reverse lookup from bin id to reference-point indices

use log::debug;
use turtle_core::{Error, ReferenceDataset, Result};
use turtle_tree::Partition;

/// Progress cadence while deriving the map
const PROGRESS_EVERY: usize = 50_000;

/// Map from bin id to the original indices of the reference points in
/// that bin
///
/// Derived exactly once, immediately after partition construction, by
/// one descent per reference point in original order. Every bin id is
/// present from the start, so lookups are total: an unknown or empty
/// bin yields an empty slice, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct BinIndexMap {
    indices: Vec<Vec<usize>>,
}

impl BinIndexMap {
    /// Derive the map for `partition` over the dataset it was built from
    ///
    /// A reference point that resolves outside the valid bin range
    /// violates the construction invariant (the partition was built
    /// from exactly these points); that is a fatal error, not a
    /// recoverable condition.
    pub fn derive(partition: &Partition, dataset: &ReferenceDataset) -> Result<Self> {
        if dataset.dimension() != partition.dimension() {
            return Err(Error::dimension_mismatch(
                partition.dimension(),
                dataset.dimension(),
                "index map derivation",
            ));
        }
        debug!("building indices map over {} points", dataset.len());

        let mut indices = vec![Vec::new(); partition.num_bins()];
        for (entry, point) in dataset.points().enumerate() {
            if entry > 0 && entry % PROGRESS_EVERY == 0 {
                debug!("  {entry:>10}");
            }
            let bin = partition.resolve_bin(point);
            let slot = indices.get_mut(bin).ok_or_else(|| {
                Error::CorruptPartition(format!(
                    "reference point {entry} resolved to bin {bin} of {}",
                    partition.num_bins()
                ))
            })?;
            slot.push(entry);
        }
        Ok(Self { indices })
    }

    /// Original reference-point indices in bin `bin`
    ///
    /// Empty for an unknown bin id.
    pub fn indices(&self, bin: usize) -> &[usize] {
        self.indices.get(bin).map_or(&[], Vec::as_slice)
    }

    /// Number of bins in the map
    pub fn num_bins(&self) -> usize {
        self.indices.len()
    }
}
