//! Numeric routines over [`Matrix<f64>`](crate::math::Matrix).
//!
//! Every routine validates its own operand shapes and returns a
//! [`MatrixError`](crate::error::MatrixError) instead of panicking. Routines
//! that eliminate in place clone their input first, so callers keep their
//! matrices untouched.
//!
//! Elimination uses partial pivoting: before clearing a column, the row with
//! the largest absolute entry in that column (among the rows not yet used as
//! pivots) is swapped into place. A pivot whose magnitude is below the
//! tolerance counts as zero.
pub mod arithmetic;
pub mod cramer;
pub mod determinant;
pub mod elimination;
pub mod power;

pub use arithmetic::{add, divide_elementwise, multiply, subtract, transpose};
pub use cramer::solve_cramer;
pub use determinant::{cofactor_determinant, determinant, elimination_determinant, DeterminantMethod};
pub use elimination::{inverse, rank, reduced_row_echelon};
pub use power::{power, MAX_POWER_EXPONENT};

use crate::error::MatrixError;
use crate::math::Matrix;

/// Magnitude below which a pivot or determinant is treated as zero.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

/// Row index in `from..nrows` holding the largest `|m[row][col]|`.
///
/// Ties keep the earliest row, so an already well-placed pivot is not moved.
pub(crate) fn pivot_row(m: &Matrix<f64>, col: usize, from: usize) -> usize {
    let mut best = from;
    let mut best_val = m[(from, col)].abs();
    for row in (from + 1)..m.nrows() {
        let val = m[(row, col)].abs();
        if val > best_val {
            best = row;
            best_val = val;
        }
    }
    log::trace!(
        "[Calai::Linalg] column {} pivot row {} (|p| = {:e})",
        col,
        best,
        best_val
    );
    best
}

/// True when `value` counts as zero: an exact zero always does, whatever the
/// tolerance, and so does NaN.
pub(crate) fn is_negligible(value: f64, tolerance: f64) -> bool {
    value == 0.0 || !(value.abs() >= tolerance)
}

pub(crate) fn require_square(m: &Matrix<f64>, what: &str) -> Result<(), MatrixError> {
    if !m.is_square() {
        return Err(MatrixError::ShapeRequirement(format!(
            "Matrix must be square for {} (got {}x{})",
            what,
            m.nrows(),
            m.ncols()
        )));
    }
    Ok(())
}

pub(crate) fn require_non_empty(m: &Matrix<f64>, what: &str) -> Result<(), MatrixError> {
    if m.is_empty() {
        return Err(MatrixError::ShapeRequirement(format!(
            "{} needs a matrix with at least one cell",
            what
        )));
    }
    Ok(())
}
