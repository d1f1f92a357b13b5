//! Error type shared by the numerics routines.

use std::error::Error;
use std::fmt;

/// Failure of a numerical routine.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericsError {
    /// The iteration budget ran out before the tolerance was met.
    Convergence {
        /// Iterations performed.
        iterations: usize,
        /// Last iterate.
        last: f64,
    },
    /// The iteration left the domain where it can make progress.
    Divergence {
        /// What went wrong.
        reason: String,
    },
    /// Arguments the routine cannot work with.
    InvalidInput {
        /// What was wrong with them.
        reason: String,
    },
}

impl NumericsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn diverged(reason: impl Into<String>) -> Self {
        Self::Divergence {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NumericsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Convergence { iterations, last } => {
                write!(f, "no convergence after {iterations} iterations (last {last})")
            }
            Self::Divergence { reason } => write!(f, "diverged: {reason}"),
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
        }
    }
}

impl Error for NumericsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = NumericsError::Convergence {
            iterations: 50,
            last: 1.5,
        };
        assert_eq!(e.to_string(), "no convergence after 50 iterations (last 1.5)");
        assert_eq!(
            NumericsError::invalid("no bracket").to_string(),
            "invalid input: no bracket"
        );
    }
}
