//! Operation dispatch for the matrix calculator.
//!
//! [`MatrixEngine`] takes two operand matrices and an [`Operation`], checks
//! the operation's shape requirements, runs the matching routine from
//! [`crate::linalg`] or [`crate::radix`], and reports every successful
//! calculation to its [`HistoryLog`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::MatrixError;
use crate::history::{Category, HistoryLog, NullHistory};
use crate::linalg::{self, power::exponent_from_cell, require_square};
use crate::math::Matrix;
use crate::radix::{format_radix, Radix};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    /// Element-wise (Hadamard) division.
    Divide,
    Transpose,
    Determinant,
    Inverse,
    Rank,
    Cramer,
    GaussJordan,
    Power,
    Binary,
    Hexadecimal,
    Decimal,
    Octal,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Transpose,
        Operation::Determinant,
        Operation::Inverse,
        Operation::Rank,
        Operation::Cramer,
        Operation::GaussJordan,
        Operation::Power,
        Operation::Binary,
        Operation::Hexadecimal,
        Operation::Decimal,
        Operation::Octal,
    ];

    /// Tag used by callers to select the operation.
    pub fn tag(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Transpose => "transpose",
            Operation::Determinant => "determinant",
            Operation::Inverse => "inverse",
            Operation::Rank => "rank",
            Operation::Cramer => "cramer",
            Operation::GaussJordan => "gauss-jordan",
            Operation::Power => "power",
            Operation::Binary => "binary",
            Operation::Hexadecimal => "hexadecimal",
            Operation::Decimal => "decimal",
            Operation::Octal => "octal",
        }
    }

    /// Whether the second operand takes part in the calculation.
    pub fn uses_rhs(self) -> bool {
        matches!(
            self,
            Operation::Add
                | Operation::Subtract
                | Operation::Multiply
                | Operation::Divide
                | Operation::Cramer
                | Operation::Power
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operation {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.tag() == s)
            .ok_or_else(|| MatrixError::UnsupportedOperation(format!("Unknown operation: {}", s)))
    }
}

/// Result of a calculation. The operation alone decides the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Matrix(Matrix<f64>),
    Scalar(f64),
    Text(String),
}

impl Outcome {
    pub fn as_matrix(&self) -> Option<&Matrix<f64>> {
        match self {
            Outcome::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Outcome::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Outcome::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Compact form recorded in the history, e.g. `[[6,8],[10,12]]` or `-2`.
    pub fn history_text(&self) -> String {
        match self {
            Outcome::Matrix(m) => m.mapv(|v| unsigned_zero(*v)).to_string(),
            Outcome::Scalar(v) => unsigned_zero(*v).to_string(),
            Outcome::Text(s) => s.clone(),
        }
    }

    /// Display form: fixed `precision` decimals, one matrix row per line,
    /// columns right-aligned.
    pub fn render(&self, precision: usize) -> String {
        match self {
            Outcome::Matrix(m) => {
                let cells = m.mapv(|v| fixed(*v, precision));
                let width = cells.as_slice().iter().map(String::len).max().unwrap_or(0);
                cells
                    .rows_iter()
                    .map(|row| {
                        row.iter()
                            .map(|c| format!("{:>width$}", c, width = width))
                            .collect::<Vec<_>>()
                            .join("  ")
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Outcome::Scalar(v) => fixed(*v, precision),
            Outcome::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.history_text())
    }
}

fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

fn fixed(v: f64, precision: usize) -> String {
    let half_ulp = 0.5 * 10f64.powi(-(precision.min(300) as i32));
    let v = if v.abs() < half_ulp { 0.0 } else { v };
    format!("{:.*}", precision, v)
}

/// Declared `(rows, cols)` of an operand.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn of<T>(m: &Matrix<T>) -> Self {
        let (rows, cols) = m.shape();
        Self { rows, cols }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Matrix calculator with an injected history sink.
///
/// The engine holds no mutable state; share it freely across threads when
/// `H` allows it.
#[derive(Debug, Clone)]
pub struct MatrixEngine<H = NullHistory> {
    config: EngineConfig,
    history: H,
}

impl Default for MatrixEngine<NullHistory> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MatrixEngine<NullHistory> {
    /// Engine that records nothing.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            history: NullHistory,
        }
    }
}

impl<H: HistoryLog> MatrixEngine<H> {
    pub fn with_history(config: EngineConfig, history: H) -> Self {
        Self { config, history }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Run `op` on `lhs` (and `rhs` where the operation takes two operands).
    pub fn compute(
        &self,
        lhs: &Matrix<f64>,
        rhs: &Matrix<f64>,
        op: Operation,
    ) -> Result<Outcome, MatrixError> {
        log::debug!(
            "[Calai::Engine] {} on {} and {}",
            op,
            Dimensions::of(lhs),
            Dimensions::of(rhs)
        );

        let outcome = self.evaluate(lhs, rhs, op).map_err(|e| {
            log::debug!("[Calai::Engine] {} rejected: {}", op, e);
            e
        })?;
        self.record(lhs, rhs, op, &outcome);
        Ok(outcome)
    }

    /// Like [`compute`](Self::compute), but first checks that the
    /// caller-declared dimensions match the operands. The second operand is
    /// only checked when the operation uses it.
    pub fn compute_declared(
        &self,
        lhs: &Matrix<f64>,
        rhs: &Matrix<f64>,
        op: Operation,
        declared_lhs: Dimensions,
        declared_rhs: Dimensions,
    ) -> Result<Outcome, MatrixError> {
        check_declared("first", lhs, declared_lhs)?;
        if op.uses_rhs() {
            check_declared("second", rhs, declared_rhs)?;
        }
        self.compute(lhs, rhs, op)
    }

    /// Entry point taking plain nested rows, an operation tag and declared
    /// dimensions, as supplied by a form-based front end.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_grid(
        &self,
        matrix1: &[Vec<f64>],
        matrix2: &[Vec<f64>],
        operation: &str,
        rows1: usize,
        cols1: usize,
        rows2: usize,
        cols2: usize,
    ) -> Result<Outcome, MatrixError> {
        let op: Operation = operation.parse()?;
        let lhs = Matrix::from_rows(matrix1.to_vec())?;
        let rhs = Matrix::from_rows(matrix2.to_vec())?;
        self.compute_declared(
            &lhs,
            &rhs,
            op,
            Dimensions::new(rows1, cols1),
            Dimensions::new(rows2, cols2),
        )
    }

    fn evaluate(
        &self,
        lhs: &Matrix<f64>,
        rhs: &Matrix<f64>,
        op: Operation,
    ) -> Result<Outcome, MatrixError> {
        let tol = self.config.pivot_tolerance;
        let method = self.config.determinant_method;

        let outcome = match op {
            Operation::Add => Outcome::Matrix(linalg::add(lhs, rhs)?),
            Operation::Subtract => Outcome::Matrix(linalg::subtract(lhs, rhs)?),
            Operation::Multiply => Outcome::Matrix(linalg::multiply(lhs, rhs)?),
            Operation::Divide => Outcome::Matrix(linalg::divide_elementwise(lhs, rhs)?),
            Operation::Transpose => Outcome::Matrix(linalg::transpose(lhs)),
            Operation::Determinant => Outcome::Scalar(linalg::determinant(lhs, method, tol)?),
            Operation::Inverse => Outcome::Matrix(linalg::inverse(lhs, tol)?),
            Operation::Rank => Outcome::Scalar(linalg::rank(lhs, tol) as f64),
            Operation::Cramer => Outcome::Matrix(linalg::solve_cramer(lhs, rhs, method, tol)?),
            Operation::GaussJordan => Outcome::Matrix(linalg::reduced_row_echelon(lhs, tol)),
            Operation::Power => {
                require_square(lhs, "power operation")?;
                if rhs.shape() != (1, 1) {
                    return Err(MatrixError::ShapeRequirement(
                        "Power must be a single number (1x1 matrix)".to_string(),
                    ));
                }
                let exponent = exponent_from_cell(rhs[(0, 0)])?;
                Outcome::Matrix(linalg::power(lhs, exponent)?)
            }
            Operation::Binary => convert_cell(lhs, Radix::Binary)?,
            Operation::Hexadecimal => convert_cell(lhs, Radix::Hexadecimal)?,
            Operation::Decimal => convert_cell(lhs, Radix::Decimal)?,
            Operation::Octal => convert_cell(lhs, Radix::Octal)?,
        };
        Ok(outcome)
    }

    fn record(&self, lhs: &Matrix<f64>, rhs: &Matrix<f64>, op: Operation, outcome: &Outcome) {
        let description = format!("Matrix {}: {} {} {}", op, lhs, op, rhs);
        if let Err(e) = self
            .history
            .append(Category::Matrix, &description, &outcome.history_text())
        {
            log::warn!("[Calai::Engine] Failed to record {} in history: {}", op, e);
        }
    }
}

fn convert_cell(m: &Matrix<f64>, radix: Radix) -> Result<Outcome, MatrixError> {
    if m.shape() != (1, 1) {
        return Err(MatrixError::ShapeRequirement(
            "Please use a 1x1 matrix (single number) for number system conversions".to_string(),
        ));
    }
    Ok(Outcome::Text(format_radix(m[(0, 0)], radix)?))
}

fn check_declared(
    which: &str,
    m: &Matrix<f64>,
    declared: Dimensions,
) -> Result<(), MatrixError> {
    let actual = Dimensions::of(m);
    if actual != declared {
        return Err(MatrixError::DimensionMismatch(format!(
            "{} matrix was declared as {} but holds {}",
            which, declared, actual
        )));
    }
    Ok(())
}
