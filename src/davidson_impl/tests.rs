#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{DMatrix, DVector};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::davidson_impl::{
        symmetric_eigen_sorted, DavidsonOptions, DavidsonSolver, Eigenpair,
    };
    use crate::error::CiError;

    /// A random symmetric matrix with a dominant diagonal, the structure the
    /// preconditioner expects from a CI Hamiltonian
    fn diagonally_dominant_matrix(dim: usize, seed: u64) -> DMatrix<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut matrix = DMatrix::zeros(dim, dim);
        for i in 0..dim {
            matrix[(i, i)] = i as f64;
            for j in 0..i {
                let value: f64 = rng.gen_range(-0.05..0.05);
                matrix[(i, j)] = value;
                matrix[(j, i)] = value;
            }
        }
        matrix
    }

    fn unit_vector_guess(dim: usize, columns: usize) -> DMatrix<f64> {
        let mut guess = DMatrix::zeros(dim, columns);
        for col in 0..columns {
            guess[(col, col)] = 1.0;
        }
        guess
    }

    fn solve_with_defaults(
        matrix: &DMatrix<f64>,
        options: DavidsonOptions,
    ) -> Vec<Eigenpair> {
        let diagonal = matrix.diagonal();
        let guess = unit_vector_guess(matrix.nrows(), options.number_of_requested_eigenpairs);
        let solver = DavidsonSolver::new(diagonal, guess, options).unwrap();
        solver.solve(|x| Ok(matrix * x)).unwrap()
    }

    #[test]
    fn sorted_eigendecomposition_is_ascending() {
        let matrix = diagonally_dominant_matrix(12, 1);
        let (eigenvalues, eigenvectors) = symmetric_eigen_sorted(matrix.clone());

        for i in 1..eigenvalues.len() {
            assert!(eigenvalues[i] >= eigenvalues[i - 1]);
        }
        for i in 0..eigenvalues.len() {
            let column = eigenvectors.column(i).into_owned();
            let residual = (&matrix * &column - eigenvalues[i] * &column).norm();
            assert!(residual < 1.0e-10, "residual {residual}");
        }
    }

    #[test]
    fn lowest_eigenpair_matches_dense_diagonalization() {
        let matrix = diagonally_dominant_matrix(50, 2);
        let (reference, _) = symmetric_eigen_sorted(matrix.clone());

        let pairs = solve_with_defaults(&matrix, DavidsonOptions::default());
        assert_eq!(pairs.len(), 1);
        assert_abs_diff_eq!(pairs[0].eigenvalue, reference[0], epsilon = 1.0e-8);

        let residual =
            (&matrix * &pairs[0].eigenvector - pairs[0].eigenvalue * &pairs[0].eigenvector).norm();
        assert!(residual < 1.0e-7, "residual {residual}");
        assert_relative_eq!(pairs[0].eigenvector.norm(), 1.0, epsilon = 1.0e-8);
    }

    #[test]
    fn multiple_eigenpairs_on_a_large_matrix() {
        let matrix = diagonally_dominant_matrix(200, 3);
        let (reference, _) = symmetric_eigen_sorted(matrix.clone());

        let options = DavidsonOptions {
            number_of_requested_eigenpairs: 3,
            collapsed_subspace_dimension: 6,
            ..DavidsonOptions::default()
        };
        let pairs = solve_with_defaults(&matrix, options);
        assert_eq!(pairs.len(), 3);
        for (col, pair) in pairs.iter().enumerate() {
            assert_abs_diff_eq!(pair.eigenvalue, reference[col], epsilon = 1.0e-7);
        }
    }

    #[test]
    fn subspace_collapse_is_exercised() {
        // a tight cap forces collapses well before convergence
        let matrix = diagonally_dominant_matrix(120, 4);
        let (reference, _) = symmetric_eigen_sorted(matrix.clone());

        let options = DavidsonOptions {
            maximum_subspace_dimension: 4,
            collapsed_subspace_dimension: 2,
            ..DavidsonOptions::default()
        };
        let pairs = solve_with_defaults(&matrix, options);
        assert_abs_diff_eq!(pairs[0].eigenvalue, reference[0], epsilon = 1.0e-8);
    }

    #[test]
    fn iteration_cap_reports_non_convergence() {
        let matrix = diagonally_dominant_matrix(60, 5);
        let options = DavidsonOptions {
            maximum_number_of_iterations: 1,
            ..DavidsonOptions::default()
        };
        let solver =
            DavidsonSolver::new(matrix.diagonal(), unit_vector_guess(60, 1), options).unwrap();

        match solver.solve(|x| Ok(&matrix * x)) {
            Err(CiError::NonConvergence { iterations }) => assert_eq!(iterations, 1),
            other => panic!("expected non-convergence, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn constructor_rejects_inconsistent_options() {
        let diagonal = DVector::from_element(10, 1.0);

        // fewer guess vectors than requested eigenpairs
        let options = DavidsonOptions {
            number_of_requested_eigenpairs: 2,
            collapsed_subspace_dimension: 2,
            ..DavidsonOptions::default()
        };
        assert!(matches!(
            DavidsonSolver::new(diagonal.clone(), unit_vector_guess(10, 1), options),
            Err(CiError::InvalidConfiguration(_))
        ));

        // guess rows disagree with the diagonal
        assert!(matches!(
            DavidsonSolver::new(
                diagonal.clone(),
                unit_vector_guess(9, 1),
                DavidsonOptions::default()
            ),
            Err(CiError::InvalidConfiguration(_))
        ));

        // collapsed subspace too small for the requested eigenpairs
        let options = DavidsonOptions {
            number_of_requested_eigenpairs: 3,
            collapsed_subspace_dimension: 2,
            ..DavidsonOptions::default()
        };
        assert!(matches!(
            DavidsonSolver::new(diagonal.clone(), unit_vector_guess(10, 3), options),
            Err(CiError::InvalidConfiguration(_))
        ));

        // collapsed subspace at least as large as the maximum subspace
        let options = DavidsonOptions {
            maximum_subspace_dimension: 5,
            collapsed_subspace_dimension: 5,
            ..DavidsonOptions::default()
        };
        assert!(matches!(
            DavidsonSolver::new(diagonal.clone(), unit_vector_guess(10, 1), options),
            Err(CiError::InvalidConfiguration(_))
        ));

        // zero requested eigenpairs
        let options = DavidsonOptions {
            number_of_requested_eigenpairs: 0,
            ..DavidsonOptions::default()
        };
        assert!(matches!(
            DavidsonSolver::new(diagonal, unit_vector_guess(10, 1), options),
            Err(CiError::InvalidConfiguration(_))
        ));
    }
}
