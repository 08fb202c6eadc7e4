//! Element-wise arithmetic, the matrix product and transposition.

use crate::error::MatrixError;
use crate::math::Matrix;

fn require_same_shape(a: &Matrix<f64>, b: &Matrix<f64>, what: &str) -> Result<(), MatrixError> {
    if a.shape() != b.shape() {
        return Err(MatrixError::DimensionMismatch(format!(
            "Matrices must have the same dimensions for {} ({}x{} vs {}x{})",
            what,
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(())
}

pub fn add(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, MatrixError> {
    require_same_shape(a, b, "addition")?;
    a.try_zip_map(b, |_, _, x, y| Ok(x + y))
}

pub fn subtract(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, MatrixError> {
    require_same_shape(a, b, "subtraction")?;
    a.try_zip_map(b, |_, _, x, y| Ok(x - y))
}

/// Hadamard quotient `a[i][j] / b[i][j]`. Any exact zero in `b` is an error.
pub fn divide_elementwise(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, MatrixError> {
    require_same_shape(a, b, "division")?;
    a.try_zip_map(b, |row, col, x, y| {
        if *y == 0.0 {
            Err(MatrixError::DivisionByZero { row, col })
        } else {
            Ok(x / y)
        }
    })
}

/// Standard product: `c[i][j] = sum_k a[i][k] * b[k][j]`.
pub fn multiply(a: &Matrix<f64>, b: &Matrix<f64>) -> Result<Matrix<f64>, MatrixError> {
    if a.ncols() != b.nrows() {
        return Err(MatrixError::DimensionMismatch(format!(
            "Number of columns in first matrix ({}) must equal number of rows in second matrix ({})",
            a.ncols(),
            b.nrows()
        )));
    }
    let inner = a.ncols();
    Ok(Matrix::from_fn(a.nrows(), b.ncols(), |i, j| {
        (0..inner).map(|k| a[(i, k)] * b[(k, j)]).sum()
    }))
}

pub fn transpose(a: &Matrix<f64>) -> Matrix<f64> {
    a.transpose()
}
