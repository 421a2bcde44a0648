//! Bin geometry types

use serde::{Deserialize, Serialize};

/// A single leaf of the space partition
///
/// A bin is a hyper-rectangular region of the coordinate space,
/// described by its per-axis min and max edges. Bin ids are assigned
/// depth-first (left before right) during construction and are stable
/// for the lifetime of the partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    id: usize,
    min_edges: Vec<f64>,
    max_edges: Vec<f64>,
}

impl Bin {
    pub(crate) fn new(id: usize, min_edges: Vec<f64>, max_edges: Vec<f64>) -> Self {
        debug_assert_eq!(min_edges.len(), max_edges.len());
        Self {
            id,
            min_edges,
            max_edges,
        }
    }

    /// Stable bin id in `[0, numberofbins)`
    pub fn id(&self) -> usize {
        self.id
    }

    /// Per-axis lower edges
    pub fn min_edges(&self) -> &[f64] {
        &self.min_edges
    }

    /// Per-axis upper edges
    pub fn max_edges(&self) -> &[f64] {
        &self.max_edges
    }

    /// Per-axis midpoints
    pub fn center(&self) -> Vec<f64> {
        self.min_edges
            .iter()
            .zip(&self.max_edges)
            .map(|(lo, hi)| 0.5 * (lo + hi))
            .collect()
    }

    /// Per-axis widths
    pub fn width(&self) -> Vec<f64> {
        self.min_edges
            .iter()
            .zip(&self.max_edges)
            .map(|(lo, hi)| hi - lo)
            .collect()
    }

    /// Product of per-axis widths
    pub fn volume(&self) -> f64 {
        self.min_edges
            .iter()
            .zip(&self.max_edges)
            .map(|(lo, hi)| hi - lo)
            .product()
    }
}

/// One node of the partition arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum Node {
    Split {
        axis: usize,
        value: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        bin: usize,
    },
}
