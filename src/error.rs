//! Error types for the DOCI library

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CiError {
    /// Malformed constructor arguments, dimension mismatches, non-unitary
    /// rotation matrices, too few initial guesses. Always raised before any
    /// numerical work begins.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The dimension of the configuration space cannot be represented in the
    /// address integer type. Distinct from `InvalidConfiguration` so callers
    /// can tell "problem too large" from "bad input".
    #[error("dimension overflow: {0}")]
    Overflow(String),

    /// An iterative solver reached its iteration cap. Fatal for that solve;
    /// no partial results are returned.
    #[error("did not converge within {iterations} iterations")]
    NonConvergence { iterations: usize },
}

pub type Result<T> = std::result::Result<T, CiError>;
