//! calai-matrix: the matrix engine behind the CalAI calculator.
//!
//! This crate provides a small dense `Matrix` type, the numeric routines the
//! calculator exposes (arithmetic, determinants, inversion, rank, Cramer's
//! rule, Gauss-Jordan reduction, integer powers, number-base conversion), a
//! tag-keyed dispatcher (`MatrixEngine`) and the bounded calculation history
//! it reports to.
//!
//! The engine is synchronous and holds no mutable state of its own. The
//! history is injected, so callers decide whether calculations are kept in
//! memory, written to a JSON file, or discarded.
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod linalg;
pub mod math;
pub mod radix;

pub use config::{load_engine_config, EngineConfig};
pub use engine::{Dimensions, MatrixEngine, Operation, Outcome};
pub use error::{HistoryError, MatrixError};
pub use history::{CalculationHistory, Category, HistoryEntry, HistoryLog, NullHistory};
pub use math::{Matrix, ShapeError};
