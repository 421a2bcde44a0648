//! Equal-population k-d binning for multi-dimensional samples
//!
//! This is the umbrella crate for the turtle-binning workspace. It
//! re-exports the member crates:
//!
//! - [`turtle_core`] - error type, reference dataset, point sources
//! - [`turtle_tree`] - the recursive space partition
//! - [`turtle`] - the `Turtle` facade, accumulator and index map
//!
//! # Example
//!
//! ```rust
//! use turtle_binning::turtle::Turtle;
//!
//! // Eight 1-d reference points, two equal-population bins.
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let mut turtle = Turtle::from_rows(&data, 2, 8, 1).unwrap();
//!
//! turtle.fill(&[2.5], 3.0).unwrap();
//! assert_eq!(turtle.counts()[0], 3.0);
//! assert_eq!(turtle.indices(0), &[0, 1, 2, 3]);
//! ```

pub use turtle;
pub use turtle_core;
pub use turtle_tree;

pub use turtle::Turtle;
pub use turtle_core::{Error, Result};
pub use turtle_tree::Partition;
