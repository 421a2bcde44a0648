//! Error types for the turtle-binning crates
//!
//! Provides a unified error type shared by every crate in the
//! workspace.

use thiserror::Error;

/// Core error type for binning operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} points, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// A point's arity does not match the structure it is used with
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// A built partition violated one of its own invariants
    #[error("Corrupt partition: {0}")]
    CorruptPartition(String),

    /// A point source failed while producing records
    #[error("Source error: {0}")]
    Source(String),

    /// CSV parsing or reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a point of the wrong arity
    pub fn dimension_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::DimensionMismatch {
            expected,
            actual,
            context: context.to_string(),
        }
    }

    /// Create an error for a buffer whose length disagrees with its shape
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a missing named column in a source
    pub fn missing_column(name: &str, path: &str) -> Self {
        Self::Source(format!("Column '{name}' not found in '{path}'"))
    }
}
