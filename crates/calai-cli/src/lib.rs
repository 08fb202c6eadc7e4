//! Library side of the `calai` binary: argument-to-engine plumbing that the
//! integration tests can call directly.
pub mod matrix;
pub mod util;
