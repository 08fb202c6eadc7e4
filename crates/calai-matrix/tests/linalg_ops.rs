//! Integration tests for the numeric routines in `calai_matrix::linalg`.

use calai_matrix::linalg::{
    add, cofactor_determinant, determinant, divide_elementwise, elimination_determinant, inverse,
    multiply, power, rank, reduced_row_echelon, solve_cramer, subtract, transpose,
    DeterminantMethod, DEFAULT_PIVOT_TOLERANCE, MAX_POWER_EXPONENT,
};
use calai_matrix::{Matrix, MatrixError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = DEFAULT_PIVOT_TOLERANCE;

fn m(rows: Vec<Vec<f64>>) -> Matrix<f64> {
    Matrix::from_rows(rows).expect("rectangular test matrix")
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-10.0..10.0))
}

// ---------------------------------------------------------------------------
// Element-wise arithmetic and product
// ---------------------------------------------------------------------------

#[test]
fn add_and_multiply_reference_values() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    assert_eq!(add(&a, &b).unwrap(), m(vec![vec![6.0, 8.0], vec![10.0, 12.0]]));
    assert_eq!(
        multiply(&a, &b).unwrap(),
        m(vec![vec![19.0, 22.0], vec![43.0, 50.0]])
    );
}

#[test]
fn add_then_subtract_reconstructs_operand() {
    let mut rng = StdRng::seed_from_u64(7);
    for (rows, cols) in [(1, 1), (2, 3), (4, 4), (3, 2)] {
        let a = random_matrix(&mut rng, rows, cols);
        let b = random_matrix(&mut rng, rows, cols);
        let back = subtract(&add(&a, &b).unwrap(), &b).unwrap();
        assert!(back.approx_eq(&a, 1e-9), "{} vs {}", back, a);
    }
}

#[test]
fn add_rejects_shape_mismatch() {
    let a = m(vec![vec![1.0, 2.0]]);
    let b = m(vec![vec![1.0], vec![2.0]]);
    assert!(matches!(add(&a, &b), Err(MatrixError::DimensionMismatch(_))));
    assert!(matches!(subtract(&a, &b), Err(MatrixError::DimensionMismatch(_))));
}

#[test]
fn multiply_rectangular_shapes() {
    let a = m(vec![vec![1.0, 2.0, 3.0]]);
    let b = m(vec![vec![1.0], vec![1.0], vec![1.0]]);
    assert_eq!(multiply(&a, &b).unwrap(), m(vec![vec![6.0]]));
    assert_eq!(multiply(&b, &a).unwrap().shape(), (3, 3));
    assert!(matches!(multiply(&a, &a), Err(MatrixError::DimensionMismatch(_))));
}

#[test]
fn divide_is_elementwise() {
    let a = m(vec![vec![2.0, 9.0], vec![8.0, 1.0]]);
    let b = m(vec![vec![4.0, 3.0], vec![2.0, -1.0]]);
    assert_eq!(
        divide_elementwise(&a, &b).unwrap(),
        m(vec![vec![0.5, 3.0], vec![4.0, -1.0]])
    );
}

#[test]
fn divide_reports_zero_divisor_position() {
    let a = m(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
    let b = m(vec![vec![1.0, 1.0], vec![1.0, 0.0]]);
    assert_eq!(
        divide_elementwise(&a, &b),
        Err(MatrixError::DivisionByZero { row: 1, col: 1 })
    );
}

#[test]
fn divide_rejects_shape_mismatch() {
    let a = m(vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
    let b = m(vec![vec![2.0]]);
    assert!(matches!(
        divide_elementwise(&a, &b),
        Err(MatrixError::DimensionMismatch(_))
    ));
}

#[test]
fn transpose_twice_is_identity() {
    let mut rng = StdRng::seed_from_u64(11);
    for (rows, cols) in [(1, 4), (2, 3), (4, 4)] {
        let a = random_matrix(&mut rng, rows, cols);
        assert_eq!(transpose(&transpose(&a)), a);
    }
}

// ---------------------------------------------------------------------------
// Determinant
// ---------------------------------------------------------------------------

#[test]
fn determinant_reference_values() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(cofactor_determinant(&a).unwrap(), -2.0);
    assert_eq!(cofactor_determinant(&m(vec![vec![7.5]])).unwrap(), 7.5);
}

#[test]
fn determinant_of_scaled_identity_is_square_of_scale() {
    for k in [-3.0, 0.5, 2.0, 10.0] {
        let a = m(vec![vec![k, 0.0], vec![0.0, k]]);
        assert_eq!(cofactor_determinant(&a).unwrap(), k * k);
    }
}

#[test]
fn determinant_methods_agree_on_small_matrices() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 1..=4 {
        let a = random_matrix(&mut rng, n, n);
        let cofactor = determinant(&a, DeterminantMethod::Cofactor, TOL).unwrap();
        let elimination = determinant(&a, DeterminantMethod::Elimination, TOL).unwrap();
        assert!(
            (cofactor - elimination).abs() <= 1e-8 * cofactor.abs().max(1.0),
            "n={} cofactor={} elimination={}",
            n,
            cofactor,
            elimination
        );
    }
}

#[test]
fn elimination_determinant_of_singular_matrix_is_zero() {
    let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert_eq!(elimination_determinant(&a, TOL).unwrap(), 0.0);
}

#[test]
fn determinant_requires_square_matrix() {
    let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    assert!(matches!(
        cofactor_determinant(&a),
        Err(MatrixError::ShapeRequirement(_))
    ));
}

// ---------------------------------------------------------------------------
// Inverse
// ---------------------------------------------------------------------------

#[test]
fn inverse_of_scaled_identity() {
    let a = m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]);
    assert_eq!(inverse(&a, TOL).unwrap(), m(vec![vec![0.5, 0.0], vec![0.0, 0.5]]));
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..=4 {
        let a = random_matrix(&mut rng, n, n);
        if cofactor_determinant(&a).unwrap().abs() < 1e-3 {
            continue;
        }
        let inv = inverse(&a, TOL).unwrap();
        let product = multiply(&a, &inv).unwrap();
        assert!(
            product.approx_eq(&Matrix::identity(n), 1e-6),
            "A * inv(A) = {}",
            product
        );
    }
}

#[test]
fn inverse_needs_pivoting_for_zero_leading_entry() {
    let a = m(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    assert_eq!(inverse(&a, TOL).unwrap(), a);
}

#[test]
fn inverse_of_singular_matrix_fails() {
    let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert!(matches!(inverse(&a, TOL), Err(MatrixError::SingularMatrix(_))));
}

#[test]
fn exact_zero_pivot_is_singular_even_with_zero_tolerance() {
    let singular = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert!(matches!(
        inverse(&singular, 0.0),
        Err(MatrixError::SingularMatrix(_))
    ));
    assert_eq!(rank(&singular, 0.0), 1);
    assert_eq!(elimination_determinant(&singular, 0.0).unwrap(), 0.0);

    let b = m(vec![vec![1.0], vec![1.0]]);
    for method in [DeterminantMethod::Cofactor, DeterminantMethod::Elimination] {
        assert!(matches!(
            solve_cramer(&singular, &b, method, 0.0),
            Err(MatrixError::SingularMatrix(_))
        ));
    }
}

#[test]
fn inverse_does_not_modify_input() {
    let a = m(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
    let before = a.clone();
    let _ = inverse(&a, TOL).unwrap();
    assert_eq!(a, before);
}

// ---------------------------------------------------------------------------
// Rank and reduced row-echelon form
// ---------------------------------------------------------------------------

#[test]
fn rank_of_identity_and_zero() {
    for n in 1..=4 {
        assert_eq!(rank(&Matrix::identity(n), TOL), n);
        assert_eq!(rank(&Matrix::zeros(n, n), TOL), 0);
    }
}

#[test]
fn rank_of_dependent_rows() {
    let a = m(vec![
        vec![1.0, 2.0, 3.0],
        vec![2.0, 4.0, 6.0],
        vec![1.0, 0.0, 1.0],
    ]);
    assert_eq!(rank(&a, TOL), 2);
}

#[test]
fn rank_of_wide_and_tall_matrices() {
    let wide = m(vec![vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 4.0, 6.0, 9.0]]);
    assert_eq!(rank(&wide, TOL), 2);
    assert_eq!(rank(&transpose(&wide), TOL), 2);
}

#[test]
fn rank_ignores_entries_below_tolerance() {
    let a = m(vec![vec![1.0, 0.0], vec![0.0, 1e-12]]);
    assert_eq!(rank(&a, TOL), 1);
}

#[test]
fn rref_of_invertible_matrix_is_identity() {
    let a = m(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
    let r = reduced_row_echelon(&a, TOL);
    assert!(r.approx_eq(&Matrix::identity(2), 1e-12));
}

#[test]
fn rref_of_augmented_system() {
    // x + y = 3, 2x - y = 0  =>  x = 1, y = 2
    let a = m(vec![vec![1.0, 1.0, 3.0], vec![2.0, -1.0, 0.0]]);
    let r = reduced_row_echelon(&a, TOL);
    let expected = m(vec![vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 2.0]]);
    assert!(r.approx_eq(&expected, 1e-12), "{}", r);
}

#[test]
fn rref_skips_columns_without_pivot() {
    let a = m(vec![vec![1.0, 2.0, 1.0], vec![2.0, 4.0, 0.0]]);
    let r = reduced_row_echelon(&a, TOL);
    let expected = m(vec![vec![1.0, 2.0, 0.0], vec![0.0, 0.0, 1.0]]);
    assert!(r.approx_eq(&expected, 1e-12), "{}", r);
}

// ---------------------------------------------------------------------------
// Cramer's rule
// ---------------------------------------------------------------------------

#[test]
fn cramer_solves_two_by_two_system() {
    // 2x + y = 5, x + 3y = 10  =>  x = 1, y = 3
    let a = m(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
    let b = m(vec![vec![5.0], vec![10.0]]);
    let x = solve_cramer(&a, &b, DeterminantMethod::Cofactor, TOL).unwrap();
    assert!(x.approx_eq(&m(vec![vec![1.0], vec![3.0]]), 1e-12), "{}", x);
}

#[test]
fn cramer_matches_product_with_inverse() {
    let a = m(vec![
        vec![3.0, 2.0, -1.0],
        vec![2.0, -2.0, 4.0],
        vec![-1.0, 0.5, -1.0],
    ]);
    let b = m(vec![vec![1.0], vec![-2.0], vec![0.0]]);
    let x = solve_cramer(&a, &b, DeterminantMethod::Cofactor, TOL).unwrap();
    let via_inverse = multiply(&inverse(&a, TOL).unwrap(), &b).unwrap();
    assert!(x.approx_eq(&via_inverse, 1e-9));
    assert!(x.approx_eq(&m(vec![vec![1.0], vec![-2.0], vec![-2.0]]), 1e-9));
}

#[test]
fn cramer_rejects_singular_system() {
    let a = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    let b = m(vec![vec![1.0], vec![2.0]]);
    assert!(matches!(
        solve_cramer(&a, &b, DeterminantMethod::Cofactor, TOL),
        Err(MatrixError::SingularMatrix(_))
    ));
}

#[test]
fn cramer_requires_matching_column_vector() {
    let a = m(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
    let row = m(vec![vec![5.0, 10.0]]);
    let short = m(vec![vec![5.0]]);
    for b in [row, short] {
        assert!(matches!(
            solve_cramer(&a, &b, DeterminantMethod::Cofactor, TOL),
            Err(MatrixError::ShapeRequirement(_))
        ));
    }
}

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

#[test]
fn power_zero_is_identity_and_one_is_self() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(power(&a, 0).unwrap(), Matrix::identity(2));
    assert_eq!(power(&a, 1).unwrap(), a);
}

#[test]
fn power_three_matches_repeated_product() {
    let a = m(vec![vec![1.0, 1.0], vec![1.0, 0.0]]);
    // Fibonacci matrix: A^n = [[F(n+1), F(n)], [F(n), F(n-1)]]
    assert_eq!(power(&a, 3).unwrap(), m(vec![vec![3.0, 2.0], vec![2.0, 1.0]]));
    assert_eq!(power(&a, 10).unwrap(), m(vec![vec![89.0, 55.0], vec![55.0, 34.0]]));
}

#[test]
fn power_requires_square_matrix() {
    let a = m(vec![vec![1.0, 2.0]]);
    assert!(matches!(power(&a, 2), Err(MatrixError::ShapeRequirement(_))));
}

#[test]
fn power_rejects_exponent_above_bound() {
    let a = m(vec![vec![1.0, 1.0], vec![0.0, 1.0]]);
    assert!(matches!(
        power(&a, MAX_POWER_EXPONENT + 1),
        Err(MatrixError::UnsupportedOperation(_))
    ));
}
