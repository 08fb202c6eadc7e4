use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{is_negligible, pivot_row, require_non_empty, require_square};
use crate::error::MatrixError;
use crate::math::Matrix;

/// How determinants are evaluated.
///
/// `Cofactor` is exact in structure (no pivot tolerance involved) but costs
/// O(n!) and is meant for the small sizes a calculator offers. `Elimination`
/// reduces to upper-triangular form with partial pivoting in O(n^3).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeterminantMethod {
    #[default]
    Cofactor,
    Elimination,
}

impl FromStr for DeterminantMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cofactor" => Ok(DeterminantMethod::Cofactor),
            "elimination" | "lu" => Ok(DeterminantMethod::Elimination),
            _ => Err(format!(
                "Unknown determinant method: {}. Expected `cofactor` or `elimination`",
                s
            )),
        }
    }
}

pub fn determinant(
    m: &Matrix<f64>,
    method: DeterminantMethod,
    tolerance: f64,
) -> Result<f64, MatrixError> {
    match method {
        DeterminantMethod::Cofactor => cofactor_determinant(m),
        DeterminantMethod::Elimination => elimination_determinant(m, tolerance),
    }
}

/// Laplace expansion along the first row.
///
/// `det = sum_i (-1)^i * m[0][i] * det(minor(0, i))`, with the 1x1 cell and
/// the 2x2 closed form `ad - bc` as base cases.
pub fn cofactor_determinant(m: &Matrix<f64>) -> Result<f64, MatrixError> {
    require_square(m, "determinant calculation")?;
    require_non_empty(m, "Determinant calculation")?;
    Ok(expand(m))
}

fn expand(m: &Matrix<f64>) -> f64 {
    match m.nrows() {
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        n => (0..n)
            .map(|i| {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[(0, i)] * expand(&m.minor(0, i))
            })
            .sum(),
    }
}

/// Product of the pivots of a partially pivoted forward elimination, with
/// one sign flip per row swap. A column without a usable pivot makes the
/// determinant exactly zero.
pub fn elimination_determinant(m: &Matrix<f64>, tolerance: f64) -> Result<f64, MatrixError> {
    require_square(m, "determinant calculation")?;
    require_non_empty(m, "Determinant calculation")?;

    let n = m.nrows();
    let mut work = m.clone();
    let mut det = 1.0;

    for col in 0..n {
        let p = pivot_row(&work, col, col);
        if is_negligible(work[(p, col)], tolerance) {
            return Ok(0.0);
        }
        if p != col {
            work.swap_rows(p, col);
            det = -det;
        }

        let pivot = work[(col, col)];
        det *= pivot;

        for row in (col + 1)..n {
            let factor = work[(row, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                let delta = factor * work[(col, j)];
                work[(row, j)] -= delta;
            }
        }
    }

    Ok(det)
}
