//! Bounds-checked, value-semantic dynamic vectors and square matrices.

pub mod error;
pub mod matrix;
pub mod vector;

pub use error::{Error, Result};
pub use matrix::{multiply, DynamicMatrix};
pub use vector::{dot_product, DynamicVector, Scalar};

/// Largest allowed vector length, inclusive.
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// Largest allowed matrix row/column count, inclusive.
pub const MAX_MATRIX_SIZE: usize = 10_000;
