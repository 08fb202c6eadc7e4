use std::error::Error;
use std::fmt;

use crate::math::ShapeError;

/// Failure of a matrix computation. No partial result accompanies an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Operand shapes are incompatible with the requested operation, or a
    /// declared shape disagrees with the matrix it describes.
    DimensionMismatch(String),
    /// Element-wise division met a zero divisor at `(row, col)`.
    DivisionByZero { row: usize, col: usize },
    /// Pivot or determinant fell below the singularity tolerance.
    SingularMatrix(String),
    /// Unknown operation tag or unsupported parameter.
    UnsupportedOperation(String),
    /// An operand lacks a required shape (square, 1x1, column vector, ...).
    ShapeRequirement(String),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            MatrixError::DivisionByZero { row, col } => {
                write!(f, "Division by zero at row {}, column {}", row + 1, col + 1)
            }
            MatrixError::SingularMatrix(msg) => write!(f, "Singular matrix: {}", msg),
            MatrixError::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            MatrixError::ShapeRequirement(msg) => write!(f, "Shape requirement: {}", msg),
        }
    }
}

impl Error for MatrixError {}

impl From<ShapeError> for MatrixError {
    fn from(err: ShapeError) -> Self {
        MatrixError::ShapeRequirement(err.to_string())
    }
}

/// Failure to record or persist a history entry.
#[derive(Debug)]
pub enum HistoryError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
    Csv(csv::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "history file I/O failed: {}", e),
            HistoryError::Serialize(e) => write!(f, "history could not be serialized: {}", e),
            HistoryError::Csv(e) => write!(f, "history CSV export failed: {}", e),
        }
    }
}

impl Error for HistoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HistoryError::Io(e) => Some(e),
            HistoryError::Serialize(e) => Some(e),
            HistoryError::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::Io(err)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialize(err)
    }
}

impl From<csv::Error> for HistoryError {
    fn from(err: csv::Error) -> Self {
        HistoryError::Csv(err)
    }
}
