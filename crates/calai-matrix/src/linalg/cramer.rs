use super::determinant::{determinant, DeterminantMethod};
use super::{is_negligible, require_non_empty, require_square};
use crate::error::MatrixError;
use crate::math::Matrix;

/// Solve `A x = b` by Cramer's rule: `x_i = det(A_i) / det(A)` where `A_i`
/// is `A` with column `i` replaced by `b`.
///
/// `b` must be a column vector with as many rows as `A`. Returns the
/// solution as an `n x 1` matrix.
pub fn solve_cramer(
    a: &Matrix<f64>,
    b: &Matrix<f64>,
    method: DeterminantMethod,
    tolerance: f64,
) -> Result<Matrix<f64>, MatrixError> {
    require_square(a, "Cramer's rule")?;
    require_non_empty(a, "Cramer's rule")?;
    if b.nrows() != a.nrows() || b.ncols() != 1 {
        return Err(MatrixError::ShapeRequirement(format!(
            "Second matrix must be a column vector of height {} for Cramer's rule (got {}x{})",
            a.nrows(),
            b.nrows(),
            b.ncols()
        )));
    }

    let det_a = determinant(a, method, tolerance)?;
    if is_negligible(det_a, tolerance) {
        return Err(MatrixError::SingularMatrix(
            "System has no unique solution (determinant is zero)".to_string(),
        ));
    }

    let rhs = b.column(0);
    let mut solution = Vec::with_capacity(a.nrows());
    for i in 0..a.ncols() {
        let det_i = determinant(&a.with_column(i, &rhs), method, tolerance)?;
        solution.push(det_i / det_a);
    }

    Ok(Matrix::from_shape_vec((a.nrows(), 1), solution)?)
}
