//! Partition construction and point-to-bin descent

use log::debug;
use serde::{Deserialize, Serialize};
use turtle_core::{Error, ReferenceDataset, Result};

use crate::types::{Bin, Node};

/// A fixed binary space partition with equal-population leaves
///
/// Built once from a reference dataset and immutable afterwards. Every
/// leaf (bin) holds exactly `entries_per_bin` reference points; leaf
/// ids are assigned depth-first, left before right, so rebuilding from
/// identical input yields identical ids.
///
/// The structure is a binning oracle, not a search tree: it supports
/// point-to-bin resolution and per-bin geometry queries only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    dimension: usize,
    entries_per_bin: usize,
    nodes: Vec<Node>,
    bins: Vec<Bin>,
    root: usize,
}

struct Builder<'a> {
    dataset: &'a ReferenceDataset,
    entries_per_bin: usize,
    nodes: Vec<Node>,
    bins: Vec<Bin>,
}

impl Builder<'_> {
    /// Axes ordered by decreasing coordinate spread over `order`, ties
    /// to the lower axis index.
    fn axes_by_spread(&self, order: &[usize]) -> Vec<usize> {
        let dimension = self.dataset.dimension();
        let mut spreads = vec![0.0; dimension];
        for (axis, spread) in spreads.iter_mut().enumerate() {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &i in order {
                let c = self.dataset.point(i)[axis];
                lo = lo.min(c);
                hi = hi.max(c);
            }
            *spread = hi - lo;
        }
        let mut axes: Vec<usize> = (0..dimension).collect();
        axes.sort_by(|&a, &b| spreads[b].total_cmp(&spreads[a]).then(a.cmp(&b)));
        axes
    }

    /// Recursively bisect `order` into `bins` equal-population leaves
    /// bounded by `min_edges`/`max_edges`. Returns the arena index of
    /// the subtree root.
    fn build_node(
        &mut self,
        order: &mut [usize],
        bins: usize,
        min_edges: Vec<f64>,
        max_edges: Vec<f64>,
    ) -> Result<usize> {
        if bins == 1 {
            let id = self.bins.len();
            self.bins.push(Bin::new(id, min_edges, max_edges));
            self.nodes.push(Node::Leaf { bin: id });
            return Ok(self.nodes.len() - 1);
        }

        let left_bins = bins / 2;
        let k = left_bins * self.entries_per_bin;

        // Prefer the axis of greatest spread, but require the
        // coordinates straddling the cut to differ: the descent sends
        // every point with `coord <= value` to the lower side, so a
        // cut through tied values could not be reproduced at lookup
        // time. Fall back to narrower axes until one separates.
        let mut split = None;
        for axis in self.axes_by_spread(order) {
            // Order by coordinate on the candidate axis, original
            // index as the tie-break, so the selection is fully
            // deterministic.
            let coord = |i: usize| self.dataset.point(i)[axis];
            order.select_nth_unstable_by(k, |&a, &b| {
                coord(a).total_cmp(&coord(b)).then(a.cmp(&b))
            });

            // The pivot at position k is the smallest right-side
            // coordinate; the split sits midway to the largest
            // left-side one.
            let right_min = coord(order[k]);
            let left_max = order[..k]
                .iter()
                .map(|&i| coord(i))
                .fold(f64::NEG_INFINITY, f64::max);
            if left_max < right_min {
                split = Some((axis, 0.5 * (left_max + right_min)));
                break;
            }
        }
        let (axis, value) = split.ok_or_else(|| {
            Error::InvalidInput(format!(
                "cannot split {} points into {} bins: the points on either side \
                 of the cut coincide on every axis",
                order.len(),
                bins
            ))
        })?;

        let mut left_max_edges = max_edges.clone();
        left_max_edges[axis] = value;
        let mut right_min_edges = min_edges.clone();
        right_min_edges[axis] = value;

        let (left_order, right_order) = order.split_at_mut(k);
        let left = self.build_node(left_order, left_bins, min_edges, left_max_edges)?;
        let right = self.build_node(right_order, bins - left_bins, right_min_edges, max_edges)?;

        self.nodes.push(Node::Split {
            axis,
            value,
            left,
            right,
        });
        Ok(self.nodes.len() - 1)
    }
}

impl Partition {
    /// Build an equal-population partition over `dataset`
    ///
    /// The dataset's point count must already be an exact multiple of
    /// `numberofbins` (see `ReferenceDataset::truncate_to_multiple_of`).
    /// Each recursion step splits the current subset so the left child
    /// receives exactly `floor(bins / 2) * entries_per_bin` points,
    /// along the axis of greatest spread whose straddling coordinates
    /// differ (narrower axes are tried when tied values sit on the
    /// cut). A subset whose points coincide on every axis either side
    /// of the cut cannot be divided into equal-population bins; that
    /// is rejected as invalid input rather than silently producing a
    /// partition the descent cannot reproduce.
    pub fn build(dataset: &ReferenceDataset, numberofbins: usize) -> Result<Self> {
        if numberofbins == 0 {
            return Err(Error::InvalidParameter(
                "numberofbins must be at least 1".to_string(),
            ));
        }
        if dataset.len() < numberofbins {
            return Err(Error::InsufficientData {
                expected: numberofbins,
                actual: dataset.len(),
            });
        }
        if dataset.len() % numberofbins != 0 {
            return Err(Error::InvalidInput(format!(
                "dataset size {} is not an exact multiple of {} bins",
                dataset.len(),
                numberofbins
            )));
        }
        let entries_per_bin = dataset.len() / numberofbins;
        let dimension = dataset.dimension();

        // Bounding hyper-rectangle of the full reference set; the root
        // of the subdivision.
        let mut min_edges = vec![f64::INFINITY; dimension];
        let mut max_edges = vec![f64::NEG_INFINITY; dimension];
        for point in dataset.points() {
            for axis in 0..dimension {
                min_edges[axis] = min_edges[axis].min(point[axis]);
                max_edges[axis] = max_edges[axis].max(point[axis]);
            }
        }

        let mut builder = Builder {
            dataset,
            entries_per_bin,
            nodes: Vec::with_capacity(2 * numberofbins - 1),
            bins: Vec::with_capacity(numberofbins),
        };
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        let root = builder.build_node(&mut order, numberofbins, min_edges, max_edges)?;

        debug_assert_eq!(builder.bins.len(), numberofbins);
        debug!(
            "built partition: {} bins, {} entries/bin, {} dimensions",
            numberofbins, entries_per_bin, dimension
        );
        Ok(Self {
            dimension,
            entries_per_bin,
            nodes: builder.nodes,
            bins: builder.bins,
            root,
        })
    }

    /// Resolve a point to its containing bin id
    ///
    /// Pure descent over the immutable tree: at each split,
    /// `point[axis] <= value` goes to the lower child, so a point
    /// exactly on a boundary resolves to one side, consistently.
    /// Points outside the root bounding box are clamped by the descent
    /// itself and land in the nearest boundary bin; resolution never
    /// fails.
    ///
    /// `point` must have `dimension()` coordinates; the facade checks
    /// arity before descending.
    pub fn resolve_bin(&self, point: &[f64]) -> usize {
        debug_assert_eq!(point.len(), self.dimension);
        let mut node = self.root;
        loop {
            match self.nodes[node] {
                Node::Leaf { bin } => return bin,
                Node::Split {
                    axis,
                    value,
                    left,
                    right,
                } => {
                    node = if point[axis] <= value { left } else { right };
                }
            }
        }
    }

    /// Number of bins (leaves)
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Coordinates per point
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Reference points per bin
    pub fn entries_per_bin(&self) -> usize {
        self.entries_per_bin
    }

    /// Geometry of bin `id`, or `None` for an unknown id
    pub fn bin(&self, id: usize) -> Option<&Bin> {
        self.bins.get(id)
    }

    /// All bins, in id order
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }
}
