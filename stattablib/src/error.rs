//! Error types for stattablib

use thiserror::Error;

/// Errors that can occur while building or configuring a table.
///
/// Everything structural is validated at the point of mutation, so a table
/// that was configured without errors always renders. Rendering itself only
/// fails when writing the finished document to disk fails.
#[derive(Error, Debug)]
pub enum TableError {
    /// Multicolumn spans do not add up to the table's column count
    #[error("multicolumn spans sum to {actual}, expected {expected}")]
    SpanMismatch { expected: usize, actual: usize },

    /// A custom line or data row has the wrong number of cells
    #[error("line has {actual} cells, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Unknown insertion point name
    #[error("invalid line location '{0}' (expected one of: after-multicolumns, after-columns, after-body, after-footer)")]
    InvalidLocation(String),

    /// Unknown alignment code
    #[error("invalid alignment '{0}' (expected 'l', 'c', or 'r')")]
    InvalidAlignment(String),

    /// Unknown caption location
    #[error("invalid caption location '{0}' (expected 'top' or 'bottom')")]
    InvalidCaptionLocation(String),

    /// Padding outside the supported range
    #[error("padding of {0} is out of range (must be at most 20)")]
    PaddingOutOfRange(usize),

    /// Rule and border strings must be a single character or empty
    #[error("invalid rule character '{0}' (must be a single character or empty)")]
    InvalidRuleChar(String),

    /// Removing a note that is not on the table
    #[error("note not found: '{0}'")]
    NoteNotFound(String),

    /// Removing a custom line that is not on the table
    #[error("no line at {location} matching the selector")]
    LineNotFound { location: String },

    /// Removal called with neither a value nor a position selector
    #[error("either a value or an index must be provided")]
    MissingSelector,

    /// A model summary is missing a statistic the table requires
    #[error("model summary has no statistic '{0}'")]
    MissingStatistic(String),

    /// Duplicate column key in a dataset
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A data row does not match the dataset's column count
    #[error("row '{key}' has {actual} values, expected {expected}")]
    ShapeMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// Mean-difference tables need at least two groups, and explicit pairs
    /// beyond two
    #[error("{0}")]
    GroupCount(String),

    /// IO error while writing a rendered table
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
