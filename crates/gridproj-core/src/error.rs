//! Projection error types

use thiserror::Error;

/// Errors raised while configuring a projection.
///
/// Every variant is a configuration problem detected at the call that
/// introduced it. Evaluation calls (`project`, `compute_coordinates`) never
/// return errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// The projector reports an output dimension of zero
    #[error("dimension of projection needs to be larger than 0")]
    ZeroDimension,

    /// Cell dimensions do not cover every projected dimension
    #[error(
        "number of dimensions in projection space ({expected}) does not match \
         number of cell dimensions ({actual})"
    )]
    CellDimensionMismatch { expected: usize, actual: usize },

    /// A scaling divisor is too close to zero
    #[error("scaling factor {index} must be non-zero")]
    ZeroScaleFactor { index: usize },

    /// The scale vector has no entry for an output row
    #[error("no scaling factor for output row {index} (scale has {len} entries)")]
    ScaleLength { index: usize, len: usize },

    /// Matrix text could not be parsed
    #[error("matrix parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Matrix rows have different lengths
    #[error("matrix row {line} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// Settings file or value is invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for projection configuration
pub type ProjectionResult<T> = Result<T, ProjectionError>;
