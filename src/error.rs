//! src/error.rs
//! Error types shared by every fallible operation of the band-structure code.
//! Shape problems are caught at the call boundary, eigensolver problems are
//! reported with the wavevector they happened at, and nothing is retried.

use thiserror::Error;

/// The primary error type for all fallible operations in this library.
#[derive(Error, Debug)]
pub enum TbError {
    // --- Invalid Input and Arguments ---
    #[error("Shape mismatch for '{context}': expected {expected}, got {found}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    // --- Linear Algebra and Numerical Errors ---
    #[error("Hermitian eigensolver failed at k={k:?}: {reason}")]
    NumericalFailure {
        k: Option<[f64; 3]>,
        reason: String,
    },

    #[error("Band evaluation cancelled after {done} k-points")]
    Cancelled { done: usize },

    // --- Output consumers ---
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl TbError {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, found: usize) -> Self {
        TbError::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Attach the wavevector to a numerical failure raised before it was known.
    pub(crate) fn at_k(self, kvec: [f64; 3]) -> Self {
        match self {
            TbError::NumericalFailure { k: None, reason } => TbError::NumericalFailure {
                k: Some(kvec),
                reason,
            },
            other => other,
        }
    }
}

/// A specialized `Result` type for this library's operations.
pub type Result<T> = std::result::Result<T, TbError>;
