//! Equal-population recursive space partition
//!
//! This crate builds a k-d-tree-style binary subdivision of a
//! reference point set such that every leaf (bin) contains the same
//! number of reference points, then resolves arbitrary query points to
//! their containing bin.
//!
//! The partition is fixed after construction: no inserts, no deletes,
//! no neighbor queries. [`Partition::resolve_bin`] takes `&self` only,
//! so a built partition can be shared freely between readers.
//!
//! The partition serializes with serde, so a finished subdivision can
//! be persisted and restored without replaying construction.
//!
//! # Example
//!
//! ```rust
//! use turtle_core::ReferenceDataset;
//! use turtle_tree::Partition;
//!
//! let dataset =
//!     ReferenceDataset::from_rows(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 1).unwrap();
//! let partition = Partition::build(&dataset, 2).unwrap();
//!
//! assert_eq!(partition.num_bins(), 2);
//! assert_eq!(partition.resolve_bin(&[2.5]), 0);
//! assert_eq!(partition.resolve_bin(&[7.0]), 1);
//! ```

pub mod tree;
pub mod types;

pub use tree::Partition;
pub use types::Bin;
