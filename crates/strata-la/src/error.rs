//! Error types for strata-la.
//!
//! Only numerical failures are reported through `Result`. Shape and index
//! mistakes are programmer errors and panic at the call site.

use core::fmt;

/// Errors surfaced by LU-based algebra.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinalgError {
    /// No pivot larger than epsilon was found in this column.
    Singular { column: usize },
    /// Gauss-Jordan reduction left a zero row in the left block.
    RankDeficient { rank: usize, expected: usize },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular { column } => {
                write!(f, "matrix is singular: no usable pivot in column {column}")
            }
            Self::RankDeficient { rank, expected } => {
                write!(f, "matrix is rank deficient: rank {rank}, expected {expected}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
