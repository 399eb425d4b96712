#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{DMatrix, DVector};
    use ndarray::Array4;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::error::CiError;
    use crate::fock_impl::FockSpace;
    use crate::hamiltonian_impl::{
        Doci, FrozenCoreDoci, HamiltonianBuilder, HamiltonianParameters,
    };

    /// Random integrals with the eightfold permutation symmetry of real orbitals
    fn random_parameters(k: usize, seed: u64) -> HamiltonianParameters {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut h = DMatrix::zeros(k, k);
        for p in 0..k {
            for q in 0..=p {
                let value: f64 = rng.gen_range(-1.0..1.0);
                h[(p, q)] = value;
                h[(q, p)] = value;
            }
        }

        let mut raw = Array4::zeros((k, k, k, k));
        for element in raw.iter_mut() {
            *element = rng.gen_range(-1.0..1.0);
        }
        let mut g = Array4::zeros((k, k, k, k));
        for p in 0..k {
            for q in 0..k {
                for r in 0..k {
                    for s in 0..k {
                        g[(p, q, r, s)] = (raw[(p, q, r, s)]
                            + raw[(q, p, r, s)]
                            + raw[(p, q, s, r)]
                            + raw[(q, p, s, r)]
                            + raw[(r, s, p, q)]
                            + raw[(s, r, p, q)]
                            + raw[(r, s, q, p)]
                            + raw[(s, r, q, p)])
                            / 8.0;
                    }
                }
            }
        }

        HamiltonianParameters::new(h, g, 0.0).unwrap()
    }

    fn random_vector(dim: usize, seed: u64) -> DVector<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        DVector::from_fn(dim, |_, _| rng.gen_range(-1.0..1.0))
    }

    #[test]
    fn parameters_reject_mismatched_shapes() {
        let h = DMatrix::zeros(4, 3);
        let g = Array4::zeros((4, 4, 4, 4));
        assert!(matches!(
            HamiltonianParameters::new(h, g, 0.0),
            Err(CiError::InvalidConfiguration(_))
        ));

        let h = DMatrix::zeros(4, 4);
        let g = Array4::zeros((4, 4, 3, 4));
        assert!(matches!(
            HamiltonianParameters::new(h, g, 0.0),
            Err(CiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn builders_reject_mismatched_orbital_counts() {
        let fock_space = FockSpace::new(5, 2).unwrap();
        let doci = Doci::new(&fock_space);
        let params = random_parameters(6, 1);

        assert!(matches!(
            doci.construct_hamiltonian(&params),
            Err(CiError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            doci.calculate_diagonal(&params),
            Err(CiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn dense_hamiltonian_is_symmetric() {
        let fock_space = FockSpace::new(6, 3).unwrap();
        let doci = Doci::new(&fock_space);
        let params = random_parameters(6, 2);

        let hamiltonian = doci.construct_hamiltonian(&params).unwrap();
        let asymmetry = (&hamiltonian - hamiltonian.transpose()).norm();
        assert!(asymmetry < 1.0e-12, "asymmetry {asymmetry}");
    }

    #[test]
    fn diagonal_matches_dense_hamiltonian() {
        let fock_space = FockSpace::new(7, 3).unwrap();
        let doci = Doci::new(&fock_space);
        let params = random_parameters(7, 3);

        let hamiltonian = doci.construct_hamiltonian(&params).unwrap();
        let diagonal = doci.calculate_diagonal(&params).unwrap();
        for i in 0..fock_space.dimension() {
            assert_abs_diff_eq!(diagonal[i], hamiltonian[(i, i)], epsilon = 1.0e-12);
        }
    }

    #[test]
    fn matrix_vector_product_matches_dense_hamiltonian() {
        for (k, n) in [(4, 2), (6, 3), (8, 4)] {
            let fock_space = FockSpace::new(k, n).unwrap();
            let doci = Doci::new(&fock_space);
            let params = random_parameters(k, 4);

            let hamiltonian = doci.construct_hamiltonian(&params).unwrap();
            let diagonal = doci.calculate_diagonal(&params).unwrap();
            let x = random_vector(fock_space.dimension(), 5);

            let direct = &hamiltonian * &x;
            let implicit = doci.matrix_vector_product(&params, &x, &diagonal).unwrap();
            for i in 0..fock_space.dimension() {
                assert_abs_diff_eq!(implicit[i], direct[i], epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn pairing_model_matrix_elements() {
        let spacing = 0.5;
        let strength = 0.3;
        let params = HamiltonianParameters::pairing_model(4, spacing, strength).unwrap();

        let fock_space = FockSpace::new(4, 2).unwrap();
        let doci = Doci::new(&fock_space);
        let hamiltonian = doci.construct_hamiltonian(&params).unwrap();

        // |0011> holds pairs in levels 0 and 1: the two -G self-interactions
        // cancel against the +2G exchange of the pair of pairs
        assert_relative_eq!(hamiltonian[(0, 0)], 2.0 * spacing, epsilon = 1.0e-12);
        // |0011> -> |0101> hops the upper pair from level 1 to level 2
        assert_relative_eq!(hamiltonian[(0, 1)], -strength, epsilon = 1.0e-12);
        assert_relative_eq!(hamiltonian[(1, 0)], -strength, epsilon = 1.0e-12);
    }

    #[test]
    fn rotation_rejects_non_unitary_matrices() {
        let mut params = random_parameters(4, 6);
        let not_unitary = DMatrix::from_element(4, 4, 0.5);
        assert!(matches!(
            params.rotate(&not_unitary),
            Err(CiError::InvalidConfiguration(_))
        ));

        let wrong_size = DMatrix::identity(3, 3);
        assert!(matches!(
            params.rotate(&wrong_size),
            Err(CiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn identity_rotation_leaves_integrals_unchanged() {
        let original = random_parameters(4, 7);
        let mut rotated = original.clone();
        rotated.rotate(&DMatrix::identity(4, 4)).unwrap();

        assert_relative_eq!(rotated.h(), original.h(), epsilon = 1.0e-12);
        for (a, b) in rotated.g().iter().zip(original.g().iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn permutation_rotation_relabels_orbitals() {
        let original = random_parameters(3, 8);
        let mut rotated = original.clone();

        // swap orbitals 0 and 1
        let mut u = DMatrix::zeros(3, 3);
        u[(0, 1)] = 1.0;
        u[(1, 0)] = 1.0;
        u[(2, 2)] = 1.0;
        rotated.rotate(&u).unwrap();

        assert_abs_diff_eq!(rotated.h()[(0, 0)], original.h()[(1, 1)], epsilon = 1.0e-12);
        assert_abs_diff_eq!(rotated.h()[(0, 2)], original.h()[(1, 2)], epsilon = 1.0e-12);
        assert_abs_diff_eq!(
            rotated.g()[(0, 0, 0, 0)],
            original.g()[(1, 1, 1, 1)],
            epsilon = 1.0e-12
        );
        assert_abs_diff_eq!(
            rotated.g()[(0, 1, 2, 2)],
            original.g()[(1, 0, 2, 2)],
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn zero_frozen_orbitals_reduces_to_plain_doci() {
        let fock_space = FockSpace::new(6, 3).unwrap();
        let params = random_parameters(6, 9);

        let plain = Doci::new(&fock_space);
        let reference = plain.construct_hamiltonian(&params).unwrap();

        let frozen = FrozenCoreDoci::new(Box::new(Doci::new(&fock_space)), 0);
        let wrapped = frozen.construct_hamiltonian(&params).unwrap();

        assert_relative_eq!(wrapped, reference, epsilon = 1.0e-12);
    }

    #[test]
    fn frozen_core_matrix_vector_product_matches_dense_hamiltonian() {
        let active_space = FockSpace::new(4, 2).unwrap();
        let frozen = FrozenCoreDoci::new(Box::new(Doci::new(&active_space)), 2);
        assert_eq!(frozen.expected_orbital_count(), 6);

        let params = random_parameters(6, 10);
        let hamiltonian = frozen.construct_hamiltonian(&params).unwrap();
        let diagonal = frozen.calculate_diagonal(&params).unwrap();
        let x = random_vector(active_space.dimension(), 11);

        let direct = &hamiltonian * &x;
        let implicit = frozen.matrix_vector_product(&params, &x, &diagonal).unwrap();
        for i in 0..active_space.dimension() {
            assert_abs_diff_eq!(implicit[i], direct[i], epsilon = 1.0e-12);
        }
    }

    #[test]
    fn frozen_core_rejects_active_space_integrals() {
        let active_space = FockSpace::new(4, 2).unwrap();
        let frozen = FrozenCoreDoci::new(Box::new(Doci::new(&active_space)), 2);

        // integrals over the active orbitals only, the full space is expected
        let params = random_parameters(4, 12);
        assert!(matches!(
            frozen.construct_hamiltonian(&params),
            Err(CiError::InvalidConfiguration(_))
        ));
    }
}
