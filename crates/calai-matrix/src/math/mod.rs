//! Dense matrix container used throughout the crate.
//!
//! `Matrix<T>` is a small row-major container with the handful of
//! structural helpers (row swaps, minors, column replacement, horizontal
//! stacking) that the elimination and cofactor routines in
//! [`crate::linalg`] need.
pub mod matrix;

pub use matrix::{Matrix, ShapeError};
