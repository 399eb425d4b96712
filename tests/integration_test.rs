//! End-to-end tests on the picket-fence pairing model

use approx::{assert_abs_diff_eq, assert_relative_eq};

use doci::{
    CiSolver, DavidsonOptions, Doci, FockSpace, FrozenCoreDoci, HamiltonianParameters,
};

#[test]
fn davidson_reproduces_the_dense_spectrum() {
    let fock_space = FockSpace::new(10, 5).unwrap();
    let doci = Doci::new(&fock_space);
    let params = HamiltonianParameters::pairing_model(10, 1.0, 0.3).unwrap();
    let solver = CiSolver::new(&doci, &params).unwrap();

    let dense = solver.solve_dense(3).unwrap();
    let options = DavidsonOptions {
        number_of_requested_eigenpairs: 3,
        collapsed_subspace_dimension: 6,
        ..DavidsonOptions::default()
    };
    let davidson = solver.solve_davidson(&options, None).unwrap();

    for (reference, pair) in dense.iter().zip(&davidson) {
        assert_abs_diff_eq!(pair.eigenvalue, reference.eigenvalue, epsilon = 1.0e-7);
        assert_relative_eq!(pair.eigenvector.norm(), 1.0, epsilon = 1.0e-6);
    }
}

#[test]
fn uncoupled_levels_give_the_aufbau_energy() {
    // with no pair coupling the configurations do not mix and the ground
    // state fills the lowest levels
    let fock_space = FockSpace::new(6, 3).unwrap();
    let doci = Doci::new(&fock_space);
    let spacing = 0.75;
    let params = HamiltonianParameters::pairing_model(6, spacing, 0.0).unwrap();
    let solver = CiSolver::new(&doci, &params).unwrap();

    let ground = &solver.solve_dense(1).unwrap()[0];
    assert_abs_diff_eq!(
        ground.eigenvalue,
        2.0 * spacing * (0.0 + 1.0 + 2.0),
        epsilon = 1.0e-10
    );
}

#[test]
fn frozen_core_recovers_the_full_calculation_at_weak_coupling() {
    // freezing the deepest level costs exactly its decoupled energy when
    // the coupling vanishes
    let spacing = 1.0;
    let full_space = FockSpace::new(7, 3).unwrap();
    let full = Doci::new(&full_space);
    let params = HamiltonianParameters::pairing_model(7, spacing, 0.0).unwrap();
    let full_solver = CiSolver::new(&full, &params).unwrap();
    let full_ground = full_solver.solve_dense(1).unwrap()[0].eigenvalue;

    let active_space = FockSpace::new(6, 2).unwrap();
    let frozen = FrozenCoreDoci::new(Box::new(Doci::new(&active_space)), 1);
    let frozen_solver = CiSolver::new(&frozen, &params).unwrap();
    let frozen_ground = frozen_solver.solve_dense(1).unwrap()[0].eigenvalue;

    assert_abs_diff_eq!(frozen_ground, full_ground, epsilon = 1.0e-10);
}

#[test]
fn stronger_coupling_lowers_the_ground_state() {
    let fock_space = FockSpace::new(8, 4).unwrap();
    let doci = Doci::new(&fock_space);
    let solver_energy = |strength: f64| {
        let params = HamiltonianParameters::pairing_model(8, 1.0, strength).unwrap();
        let solver = CiSolver::new(&doci, &params).unwrap();
        solver.solve_davidson(&DavidsonOptions::default(), None).unwrap()[0].eigenvalue
    };

    let weak = solver_energy(0.1);
    let strong = solver_energy(0.5);
    assert!(strong < weak, "weak {weak}, strong {strong}");
}
