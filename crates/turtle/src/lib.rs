//! Equal-population binning with weighted fill statistics
//!
//! `turtle` bins multi-dimensional sample points into bins of equal
//! reference population, built by recursive binary partitioning of a
//! reference dataset. Once built, the partition is fixed; any number
//! of independently weighted fill passes can then be routed through
//! it, accumulating per-bin counts and variances.
//!
//! # Key pieces
//!
//! - [`Turtle`] - the facade: acquire reference data, build the
//!   partition, derive the index map, then fill and query
//! - [`BinAccumulator`] - per-bin weighted counts and variances
//! - [`BinIndexMap`] - bin id to original reference-point indices
//!
//! # Example
//!
//! ```rust
//! use turtle::Turtle;
//!
//! // Eight reference points in one dimension, two bins of four.
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let mut turtle = Turtle::from_rows(&data, 2, 8, 1).unwrap();
//!
//! assert_eq!(turtle.indices(0), &[0, 1, 2, 3]);
//! assert_eq!(turtle.indices(1), &[4, 5, 6, 7]);
//!
//! // Weighted fill pass.
//! turtle.fill(&[2.5], 3.0).unwrap();
//! turtle.fill(&[2.5], 2.0).unwrap();
//! assert_eq!(turtle.counts()[0], 5.0);
//! assert_eq!(turtle.variances()[0], 13.0);
//! ```
//!
//! # Example: filling from a source
//!
//! ```rust
//! use turtle::Turtle;
//! use turtle_core::SliceSource;
//!
//! let reference: Vec<f64> = (1..=100).map(f64::from).collect();
//! let source = SliceSource::new(&reference, 1).unwrap();
//! let mut turtle = Turtle::from_source(source, 4).unwrap();
//!
//! // A later batch of points, each with weight 1.
//! let batch = [10.0, 20.0, 30.0, 90.0];
//! turtle.fill_source(SliceSource::new(&batch, 1).unwrap()).unwrap();
//! assert_eq!(turtle.counts().iter().sum::<f64>(), 4.0);
//! ```

pub mod accumulator;
pub mod facade;
pub mod indexmap;

pub use accumulator::BinAccumulator;
pub use facade::Turtle;
pub use indexmap::BinIndexMap;

pub use turtle_core::{Error, Result};
