//! Gauss-Jordan style row reduction: inverse, rank and reduced row-echelon
//! form. All three share the same pivot search and row updates.

use super::{is_negligible, pivot_row, require_non_empty, require_square};
use crate::error::MatrixError;
use crate::math::Matrix;

/// Divide row `row` by its entry in column `col`.
fn normalize_row(work: &mut Matrix<f64>, row: usize, col: usize) {
    let pivot = work[(row, col)];
    for value in work.row_slice_mut(row) {
        *value /= pivot;
    }
}

/// `work[target] -= factor * work[source]` with `factor` chosen to clear
/// column `col` of `target`. Only columns `from_col..` are touched; entries
/// to the left are already zero in both rows.
fn clear_entry(work: &mut Matrix<f64>, target: usize, source: usize, col: usize, from_col: usize) {
    let factor = work[(target, col)] / work[(source, col)];
    if factor == 0.0 {
        return;
    }
    for j in from_col..work.ncols() {
        let delta = factor * work[(source, j)];
        work[(target, j)] -= delta;
    }
}

/// Inverse via Gauss-Jordan elimination of the augmented matrix `[A | I]`.
///
/// Fails with [`MatrixError::SingularMatrix`] as soon as the best available
/// pivot of a column is smaller than `tolerance`.
pub fn inverse(m: &Matrix<f64>, tolerance: f64) -> Result<Matrix<f64>, MatrixError> {
    require_square(m, "inverse calculation")?;
    require_non_empty(m, "Inverse calculation")?;

    let n = m.nrows();
    let mut aug = m.hstack(&Matrix::identity(n))?;

    for i in 0..n {
        let p = pivot_row(&aug, i, i);
        aug.swap_rows(i, p);

        if is_negligible(aug[(i, i)], tolerance) {
            return Err(MatrixError::SingularMatrix(
                "Matrix is singular and cannot be inverted".to_string(),
            ));
        }

        normalize_row(&mut aug, i, i);
        for k in (0..n).filter(|&k| k != i) {
            clear_entry(&mut aug, k, i, i, 0);
        }
    }

    Ok(aug.select_columns(n..))
}

/// Number of linearly independent rows, counted as the pivots found by a
/// partially pivoted forward elimination. Columns whose remaining entries
/// are all below `tolerance` contribute nothing.
pub fn rank(m: &Matrix<f64>, tolerance: f64) -> usize {
    let (rows, cols) = m.shape();
    let mut work = m.clone();
    let mut rank = 0;

    for col in 0..cols {
        if rank == rows {
            break;
        }
        let p = pivot_row(&work, col, rank);
        if is_negligible(work[(p, col)], tolerance) {
            continue;
        }
        work.swap_rows(rank, p);
        for row in (rank + 1)..rows {
            clear_entry(&mut work, row, rank, col, col);
        }
        rank += 1;
    }

    rank
}

/// Reduced row-echelon form of `m`: every pivot is 1 and is the only
/// nonzero entry of its column. `m` itself is not modified.
pub fn reduced_row_echelon(m: &Matrix<f64>, tolerance: f64) -> Matrix<f64> {
    let (rows, cols) = m.shape();
    let mut work = m.clone();
    let mut current = 0;

    for col in 0..cols {
        if current == rows {
            break;
        }
        let p = pivot_row(&work, col, current);
        if is_negligible(work[(p, col)], tolerance) {
            continue;
        }
        work.swap_rows(current, p);
        normalize_row(&mut work, current, col);
        for row in (0..rows).filter(|&r| r != current) {
            clear_entry(&mut work, row, current, col, 0);
        }
        current += 1;
    }

    work
}
