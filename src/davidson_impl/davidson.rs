use nalgebra::{DMatrix, DVector, SymmetricEigen};
use tracing::debug;

use crate::error::{CiError, Result};

/// Correction vectors with a smaller norm left after orthogonalization
/// against the subspace carry no new direction and are discarded.
const SUBSPACE_INCLUSION_CUTOFF: f64 = 1.0e-3;

/// Tuning knobs for the Davidson iteration
#[derive(Debug, Clone)]
pub struct DavidsonOptions {
    /// How many of the lowest eigenpairs to find
    pub number_of_requested_eigenpairs: usize,
    /// Residual norm below which an eigenpair counts as converged
    pub convergence_threshold: f64,
    /// Floor on the preconditioner denominator |H_kk - lambda|
    pub correction_threshold: f64,
    /// Subspace size at which a collapse is triggered
    pub maximum_subspace_dimension: usize,
    /// Subspace size after a collapse
    pub collapsed_subspace_dimension: usize,
    pub maximum_number_of_iterations: usize,
}

impl Default for DavidsonOptions {
    fn default() -> Self {
        Self {
            number_of_requested_eigenpairs: 1,
            convergence_threshold: 1.0e-8,
            correction_threshold: 1.0e-12,
            maximum_subspace_dimension: 15,
            collapsed_subspace_dimension: 2,
            maximum_number_of_iterations: 125,
        }
    }
}

/// An eigenvalue with its normalized eigenvector
#[derive(Debug, Clone)]
pub struct Eigenpair {
    pub eigenvalue: f64,
    pub eigenvector: DVector<f64>,
}

/// Eigendecomposition of a symmetric matrix with the eigenvalues sorted
/// ascending and the eigenvector columns permuted to match.
pub fn symmetric_eigen_sorted(matrix: DMatrix<f64>) -> (DVector<f64>, DMatrix<f64>) {
    let eigen = SymmetricEigen::new(matrix);
    let n = eigen.eigenvalues.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

    let mut eigenvalues = DVector::zeros(n);
    let mut eigenvectors = DMatrix::zeros(eigen.eigenvectors.nrows(), n);
    for (sorted, &original) in order.iter().enumerate() {
        eigenvalues[sorted] = eigen.eigenvalues[original];
        eigenvectors.set_column(sorted, &eigen.eigenvectors.column(original));
    }

    (eigenvalues, eigenvectors)
}

/// Matrix-free Davidson-Liu solver for the lowest eigenpairs of a symmetric
/// matrix.
///
/// The matrix enters only through its diagonal (for the preconditioner) and
/// a matrix-vector product supplied to [`DavidsonSolver::solve`].
pub struct DavidsonSolver {
    diagonal: DVector<f64>,
    initial_guess: DMatrix<f64>,
    options: DavidsonOptions,
}

impl DavidsonSolver {
    /// # Arguments
    /// * `diagonal` - the diagonal of the target matrix
    /// * `initial_guess` - orthonormal start vectors, one per column
    /// * `options` - iteration parameters
    pub fn new(
        diagonal: DVector<f64>,
        initial_guess: DMatrix<f64>,
        options: DavidsonOptions,
    ) -> Result<Self> {
        let requested = options.number_of_requested_eigenpairs;
        if requested == 0 {
            return Err(CiError::InvalidConfiguration(
                "at least one eigenpair must be requested".to_string(),
            ));
        }
        if requested > diagonal.len() {
            return Err(CiError::InvalidConfiguration(format!(
                "{requested} eigenpairs were requested from a matrix of dimension {}",
                diagonal.len()
            )));
        }
        if initial_guess.nrows() != diagonal.len() {
            return Err(CiError::InvalidConfiguration(format!(
                "the initial guess has {} rows but the matrix has dimension {}",
                initial_guess.nrows(),
                diagonal.len()
            )));
        }
        if initial_guess.ncols() < requested {
            return Err(CiError::InvalidConfiguration(format!(
                "{} initial guess vectors cannot seed {requested} eigenpairs",
                initial_guess.ncols()
            )));
        }
        if options.collapsed_subspace_dimension < requested {
            return Err(CiError::InvalidConfiguration(
                "the collapsed subspace cannot hold fewer vectors than the requested eigenpairs"
                    .to_string(),
            ));
        }
        if options.collapsed_subspace_dimension >= options.maximum_subspace_dimension {
            return Err(CiError::InvalidConfiguration(
                "the collapsed subspace must be smaller than the maximum subspace".to_string(),
            ));
        }

        Ok(Self {
            diagonal,
            initial_guess,
            options,
        })
    }

    /// Run the iteration until the requested eigenpairs converge.
    ///
    /// # Arguments
    /// * `matrix_vector_product` - the action of the target matrix
    pub fn solve<F>(self, mut matrix_vector_product: F) -> Result<Vec<Eigenpair>>
    where
        F: FnMut(&DVector<f64>) -> Result<DVector<f64>>,
    {
        let Self {
            diagonal,
            initial_guess,
            options,
        } = self;
        let dim = diagonal.len();
        let requested = options.number_of_requested_eigenpairs;

        // V spans the subspace, VA holds the matrix images of its columns
        // and S = Vt A V is the subspace matrix
        let mut v = initial_guess;
        let mut va = DMatrix::zeros(dim, v.ncols());
        for j in 0..v.ncols() {
            va.set_column(j, &matrix_vector_product(&v.column(j).into_owned())?);
        }
        let mut s = v.transpose() * &va;

        let mut iterations = 0;
        loop {
            let (theta, z) = symmetric_eigen_sorted(s.clone());
            let ritz_vectors = &v * z.columns(0, requested);

            let mut delta = DMatrix::<f64>::zeros(dim, requested);
            let mut converged = true;
            for col in 0..requested {
                let mut residual = &va * z.column(col).into_owned();
                residual -= theta[col] * ritz_vectors.column(col).into_owned();
                if residual.norm() > options.convergence_threshold {
                    converged = false;
                }

                // diagonally preconditioned correction, with a floor so a
                // near-zero denominator cannot blow the vector up
                let mut correction = DVector::zeros(dim);
                for row in 0..dim {
                    let denominator = (diagonal[row] - theta[col]).abs();
                    correction[row] = if denominator > options.correction_threshold {
                        residual[row] / denominator
                    } else {
                        residual[row] / options.correction_threshold
                    };
                }
                correction.normalize_mut();
                delta.set_column(col, &correction);
            }

            if converged {
                debug!("Davidson converged after {} iterations", iterations);
                return Ok((0..requested)
                    .map(|col| Eigenpair {
                        eigenvalue: theta[col],
                        eigenvector: ritz_vectors.column(col).into_owned(),
                    })
                    .collect());
            }

            iterations += 1;
            if iterations >= options.maximum_number_of_iterations {
                return Err(CiError::NonConvergence { iterations });
            }

            for col in 0..requested {
                let mut correction = delta.column(col).into_owned();
                correction -= &v * (v.transpose() * &correction);

                let norm = correction.norm();
                if norm > SUBSPACE_INCLUSION_CUTOFF {
                    correction /= norm;

                    if v.ncols() == options.maximum_subspace_dimension {
                        let collapsed =
                            z.columns(0, options.collapsed_subspace_dimension).into_owned();
                        v = &v * &collapsed;
                        va = &va * &collapsed;
                    }

                    let image = matrix_vector_product(&correction)?;
                    let v_ncols = v.ncols();
                    v = v.insert_column(v_ncols, 0.0);
                    v.set_column(v_ncols, &correction);
                    let va_ncols = va.ncols();
                    va = va.insert_column(va_ncols, 0.0);
                    va.set_column(va_ncols, &image);
                }
            }

            s = v.transpose() * &va;
        }
    }
}
