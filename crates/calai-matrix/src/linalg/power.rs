use super::arithmetic::multiply;
use super::{require_non_empty, require_square};
use crate::error::MatrixError;
use crate::math::Matrix;

/// Largest exponent [`power`] accepts.
pub const MAX_POWER_EXPONENT: u64 = 10_000;

/// `m` raised to a non-negative integer power by repeated multiplication.
///
/// `power(m, 0)` is the identity of `m`'s size. Each step multiplies the
/// running product by `m` on the right, so the cost is `exponent - 1`
/// products of `n x n` matrices. Exponents above [`MAX_POWER_EXPONENT`] are
/// rejected with [`MatrixError::UnsupportedOperation`].
pub fn power(m: &Matrix<f64>, exponent: u64) -> Result<Matrix<f64>, MatrixError> {
    require_square(m, "power operation")?;
    require_non_empty(m, "Power operation")?;
    if exponent > MAX_POWER_EXPONENT {
        return Err(MatrixError::UnsupportedOperation(format!(
            "Power {} exceeds the maximum of {}",
            exponent, MAX_POWER_EXPONENT
        )));
    }

    if exponent == 0 {
        return Ok(Matrix::identity(m.nrows()));
    }

    let mut result = m.clone();
    for _ in 1..exponent {
        result = multiply(&result, m)?;
    }
    Ok(result)
}

/// Read an exponent from a floating point cell: round half up, reject
/// negatives and non-finite values.
pub fn exponent_from_cell(value: f64) -> Result<u64, MatrixError> {
    if !value.is_finite() {
        return Err(MatrixError::UnsupportedOperation(format!(
            "Power must be a finite number (got {})",
            value
        )));
    }
    let rounded = (value + 0.5).floor();
    if rounded < 0.0 {
        return Err(MatrixError::UnsupportedOperation(
            "Negative powers not supported".to_string(),
        ));
    }
    if rounded > u64::MAX as f64 {
        return Err(MatrixError::UnsupportedOperation(format!(
            "Power {} is too large",
            value
        )));
    }
    Ok(rounded as u64)
}
