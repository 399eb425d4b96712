//! Davidson-Liu iterative eigensolver module
//!
//! Finds the lowest eigenpairs of a large symmetric matrix that is only
//! available through its diagonal and a matrix-vector product, growing a
//! small orthonormal subspace from diagonally preconditioned residuals and
//! collapsing it when it hits a size cap.

mod davidson;
mod tests;

pub use davidson::{symmetric_eigen_sorted, DavidsonOptions, DavidsonSolver, Eigenpair};
