//! Error types and path context for reorder operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::spatial::cell::{CellAndSpan, ItemId};

/// Main error type for all fallible operations
///
/// The solver itself never fails: "no solution" is an ordinary outcome reported
/// through `Option` or `bool`. These variants cover the crate's edges, such as board
/// files, layout construction and request validation.
#[derive(Debug)]
pub enum ReorderError {
    /// Board text could not be parsed
    BoardParse {
        /// One-based line of the offending character
        line: usize,
        /// One-based column of the offending character
        column: usize,
        /// What is wrong at that position
        reason: String,
    },

    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An item cannot be placed where it was asked to go
    InvalidPlacement {
        /// Rejected rectangle
        rect: CellAndSpan,
        /// Why it was rejected
        reason: String,
    },

    /// Handle does not refer to an item on the layout
    UnknownItem {
        /// The unknown handle
        item: ItemId,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardParse {
                line,
                column,
                reason,
            } => {
                write!(f, "Board parse error at line {line}, column {column}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPlacement { rect, reason } => {
                write!(f, "Cannot place item at {rect}: {reason}")
            }
            Self::UnknownItem { item } => {
                write!(f, "Item {item} is not on this layout")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ReorderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reorder results
pub type Result<T> = std::result::Result<T, ReorderError>;

impl From<std::io::Error> for ReorderError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Attaches the file and operation to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into a [`ReorderError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| ReorderError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ReorderError {
    ReorderError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a board parse error at a one-based position
pub fn board_parse_error(line: usize, column: usize, reason: &impl ToString) -> ReorderError {
    ReorderError::BoardParse {
        line,
        column,
        reason: reason.to_string(),
    }
}
