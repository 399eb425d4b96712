//! The CI solver ties a Hamiltonian builder to a set of integrals and hands
//! the eigenvalue problem to either a dense diagonalization or the Davidson
//! iteration.

use nalgebra::DMatrix;
use tracing::info;

use crate::davidson_impl::{symmetric_eigen_sorted, DavidsonOptions, DavidsonSolver, Eigenpair};
use crate::error::{CiError, Result};
use crate::hamiltonian_impl::{HamiltonianBuilder, HamiltonianParameters};

/// Scoped solver for one CI eigenvalue problem.
///
/// Borrows the operator and the integrals for its lifetime; the integral
/// compatibility check runs once at construction so both solve paths can
/// assume a well-posed problem.
pub struct CiSolver<'a> {
    hamiltonian_builder: &'a dyn HamiltonianBuilder,
    hamiltonian_parameters: &'a HamiltonianParameters,
}

impl<'a> CiSolver<'a> {
    /// # Arguments
    /// * `hamiltonian_builder` - the operator over the configuration space
    /// * `hamiltonian_parameters` - the integrals the operator acts with
    pub fn new(
        hamiltonian_builder: &'a dyn HamiltonianBuilder,
        hamiltonian_parameters: &'a HamiltonianParameters,
    ) -> Result<Self> {
        if hamiltonian_parameters.orbital_count() != hamiltonian_builder.expected_orbital_count() {
            return Err(CiError::InvalidConfiguration(format!(
                "the integrals are defined for {} orbitals but the operator expects {}",
                hamiltonian_parameters.orbital_count(),
                hamiltonian_builder.expected_orbital_count()
            )));
        }

        Ok(Self {
            hamiltonian_builder,
            hamiltonian_parameters,
        })
    }

    /// The lowest `number_of_eigenpairs` eigenpairs through a full dense
    /// diagonalization. Intended for small spaces and for verifying the
    /// iterative path.
    pub fn solve_dense(&self, number_of_eigenpairs: usize) -> Result<Vec<Eigenpair>> {
        let dim = self.hamiltonian_builder.fock_space().dimension();
        if number_of_eigenpairs > dim {
            return Err(CiError::InvalidConfiguration(format!(
                "{number_of_eigenpairs} eigenpairs were requested from a space of dimension {dim}"
            )));
        }

        info!("Diagonalizing the dense Hamiltonian (dimension {})", dim);
        let hamiltonian = self
            .hamiltonian_builder
            .construct_hamiltonian(self.hamiltonian_parameters)?;
        let (eigenvalues, eigenvectors) = symmetric_eigen_sorted(hamiltonian);

        Ok((0..number_of_eigenpairs)
            .map(|i| Eigenpair {
                eigenvalue: eigenvalues[i],
                eigenvector: eigenvectors.column(i).into_owned(),
            })
            .collect())
    }

    /// The lowest eigenpairs through the matrix-free Davidson iteration.
    ///
    /// # Arguments
    /// * `options` - Davidson iteration parameters
    /// * `initial_guess` - orthonormal start vectors; when absent, unit
    ///   vectors on the smallest diagonal elements are used
    pub fn solve_davidson(
        &self,
        options: &DavidsonOptions,
        initial_guess: Option<DMatrix<f64>>,
    ) -> Result<Vec<Eigenpair>> {
        let dim = self.hamiltonian_builder.fock_space().dimension();
        info!(
            "Starting Davidson for {} eigenpairs (dimension {})",
            options.number_of_requested_eigenpairs, dim
        );

        let diagonal = self
            .hamiltonian_builder
            .calculate_diagonal(self.hamiltonian_parameters)?;

        let guess = match initial_guess {
            Some(guess) => guess,
            None => {
                let columns = options.number_of_requested_eigenpairs.min(dim);
                let mut order: Vec<usize> = (0..dim).collect();
                order.sort_by(|&a, &b| diagonal[a].total_cmp(&diagonal[b]));

                let mut guess = DMatrix::zeros(dim, columns);
                for (col, &row) in order.iter().take(columns).enumerate() {
                    guess[(row, col)] = 1.0;
                }
                guess
            }
        };

        let solver = DavidsonSolver::new(diagonal.clone(), guess, options.clone())?;
        solver.solve(|x| {
            self.hamiltonian_builder
                .matrix_vector_product(self.hamiltonian_parameters, x, &diagonal)
        })
    }
}
