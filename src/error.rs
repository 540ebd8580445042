//! Error types for the editor core.

use std::num::ParseIntError;

use thiserror::Error;

/// Misuse of the hot-point API on a graphical object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Index outside `[0, hot_point_count)`.
    #[error("hot point index {index} out of range for shape with {count} hot points")]
    HotPointOutOfRange { index: usize, count: usize },

    /// Hot-point operation on a composite.
    #[error("composite shapes have no hot points")]
    NoHotPoints,
}

/// A single row's payload could not be turned into a shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid integer {field:?}")]
    BadInt {
        field: String,
        #[source]
        source: ParseIntError,
    },

    #[error("composite wants {wanted} children but only {available} are on the stack")]
    StackUnderflow { wanted: usize, available: usize },
}

/// Failure while reading or writing a drawing file.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("line {line}: unknown shape tag {tag:?}")]
    UnknownTag { line: usize, tag: String },

    #[error("line {line}: malformed {tag} row")]
    Payload {
        line: usize,
        tag: String,
        #[source]
        source: PayloadError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
