use std::fmt;

/// Result alias for `symnmf`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input data or parameters were rejected before any computation.
    InvalidInput {
        /// What was wrong with the request.
        reason: String,
    },
    /// A data point is too far from all others to normalize against.
    DegenerateInput {
        /// Row index of the offending point.
        point: usize,
    },
    /// A non-finite value appeared during factorization.
    NumericalFailure {
        /// Update iteration in which the value was detected.
        iteration: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput { reason } => write!(f, "invalid input: {}", reason),
            Error::DegenerateInput { point } => {
                write!(f, "point {} has zero similarity to all other points", point)
            }
            Error::NumericalFailure { iteration } => {
                write!(f, "non-finite value encountered at iteration {}", iteration)
            }
        }
    }
}

impl std::error::Error for Error {}
