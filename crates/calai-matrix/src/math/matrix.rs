use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut, RangeBounds};

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Row-major dense matrix with owned storage.
///
/// Shapes are carried by the value itself; algorithms never trust a shape
/// supplied from elsewhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<T>>", into = "Vec<Vec<T>>")]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(ShapeError::Ragged {
                    row: idx,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let start = self.offset(row, 0);
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row_slice(r))
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let cols = self.cols;
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..lo * cols + cols].swap_with_slice(&mut tail[..cols]);
    }

    pub fn column(&self, col: usize) -> Vec<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        let mut values = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            values.push(self[(row, col)].clone());
        }
        values
    }

    /// Copy of the matrix with column `col` replaced by `values`.
    pub fn with_column(&self, col: usize, values: &[T]) -> Matrix<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        assert_eq!(values.len(), self.rows, "replacement column has wrong height");
        let mut out = self.clone();
        for (row, value) in values.iter().enumerate() {
            out[(row, col)] = value.clone();
        }
        out
    }

    /// Copy of the matrix without row `skip_row` and column `skip_col`.
    pub fn minor(&self, skip_row: usize, skip_col: usize) -> Matrix<T>
    where
        T: Clone,
    {
        assert!(
            skip_row < self.rows && skip_col < self.cols,
            "minor index out of bounds"
        );
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for row in (0..self.rows).filter(|&r| r != skip_row) {
            for (col, value) in self.row_slice(row).iter().enumerate() {
                if col != skip_col {
                    data.push(value.clone());
                }
            }
        }
        Matrix {
            data,
            rows: self.rows - 1,
            cols: self.cols - 1,
        }
    }

    pub fn select_columns<R>(&self, range: R) -> Matrix<T>
    where
        R: RangeBounds<usize>,
        T: Clone,
    {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
        };

        let end = match range.end_bound() {
            Bound::Unbounded => self.cols,
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
        };

        assert!(
            start <= end && end <= self.cols,
            "column slice out of bounds"
        );

        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in 0..self.rows {
            let slice = &self.row_slice(row)[start..end];
            data.extend_from_slice(slice);
        }

        Matrix {
            data,
            rows: self.rows,
            cols: new_cols,
        }
    }

    /// Place `other` to the right of `self`: `[self | other]`.
    pub fn hstack(&self, other: &Matrix<T>) -> Result<Matrix<T>, ShapeError>
    where
        T: Clone,
    {
        if self.rows != other.rows {
            return Err(ShapeError::RowCount {
                left: self.rows,
                right: other.rows,
            });
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in 0..self.rows {
            data.extend_from_slice(self.row_slice(row));
            data.extend_from_slice(other.row_slice(row));
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols,
        })
    }

    pub fn transpose(&self) -> Matrix<T>
    where
        T: Clone,
    {
        Matrix::from_fn(self.cols, self.rows, |r, c| self[(c, r)].clone())
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Combine two equally shaped matrices cell by cell. The closure receives
    /// `(row, col, lhs, rhs)` and may reject a cell.
    pub fn try_zip_map<U, E, F>(&self, other: &Matrix<T>, mut f: F) -> Result<Matrix<U>, E>
    where
        F: FnMut(usize, usize, &T, &T) -> Result<U, E>,
    {
        assert_eq!(self.shape(), other.shape(), "zip_map requires equal shapes");
        let mut data = Vec::with_capacity(self.data.len());
        for (idx, (a, b)) in self.data.iter().zip(other.data.iter()).enumerate() {
            data.push(f(idx / self.cols, idx % self.cols, a, b)?);
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows_iter().map(|r| r.to_vec()).collect()
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero + One,
{
    pub fn identity(n: usize) -> Self {
        Matrix::from_fn(n, n, |r, c| if r == c { T::one() } else { T::zero() })
    }
}

impl Matrix<f64> {
    /// Maximum absolute difference between two equally shaped matrices.
    pub fn max_abs_diff(&self, other: &Matrix<f64>) -> f64 {
        assert_eq!(self.shape(), other.shape(), "max_abs_diff requires equal shapes");
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub fn approx_eq(&self, other: &Matrix<f64>, tol: f64) -> bool {
        self.shape() == other.shape() && self.max_abs_diff(other) <= tol
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = ShapeError;

    fn try_from(value: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(value)
    }
}

impl<T: Clone> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(value: Matrix<T>) -> Self {
        value.to_rows()
    }
}

/// Compact nested-list rendering, e.g. `[[1,2],[3,4]]`.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.rows_iter().enumerate() {
            if r > 0 {
                write!(f, ",")?;
            }
            write!(f, "[")?;
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    BufferLength { rows: usize, cols: usize, len: usize },
    Ragged { row: usize, expected: usize, found: usize },
    RowCount { left: usize, right: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::Ragged { row, expected, found } => write!(
                f,
                "row {} has {} cells but the first row has {}",
                row, found, expected
            ),
            ShapeError::RowCount { left, right } => write!(
                f,
                "cannot stack matrices with {} and {} rows side by side",
                left, right
            ),
        }
    }
}

impl Error for ShapeError {}
