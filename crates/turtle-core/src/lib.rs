//! Core types for equal-population binning
//!
//! This crate provides the foundation shared by the turtle-binning
//! workspace: the unified [`Error`] type, the [`PointSource`]
//! abstraction over external suppliers of weighted points, and the
//! [`ReferenceDataset`] buffer a partition is built from.
//!
//! # Example
//!
//! ```rust
//! use turtle_core::{ReferenceDataset, SliceSource};
//!
//! let flat = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
//! let source = SliceSource::new(&flat, 1).unwrap();
//! let mut dataset = ReferenceDataset::from_source(source, None).unwrap();
//!
//! // Seven points do not divide into two bins; one is dropped.
//! let entries_per_bin = dataset.truncate_to_multiple_of(2).unwrap();
//! assert_eq!(entries_per_bin, 3);
//! assert_eq!(dataset.len(), 6);
//! ```

pub mod dataset;
pub mod error;
pub mod source;

pub use dataset::ReferenceDataset;
pub use error::{Error, Result};
pub use source::{CsvSource, PointSource, SliceSource};
