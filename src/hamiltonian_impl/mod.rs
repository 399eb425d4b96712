//! Implicit Hamiltonian operator module
//!
//! A Hamiltonian builder turns one- and two-electron integrals into the
//! action of the Hamiltonian over a configuration space: its diagonal, its
//! product with an arbitrary coefficient vector, and (for verification and
//! small problems) the full dense matrix. The matrix-free product and the
//! dense builder are required to produce numerically identical elements.
//!
//! [`Doci`] implements the seniority-zero (doubly-occupied) coupling scheme;
//! [`FrozenCoreDoci`] wraps any builder and folds frozen orbitals into
//! effective integrals over the remaining active space.

mod doci;
mod frozen_core;
mod params;
mod tests;

pub use doci::Doci;
pub use frozen_core::FrozenCoreDoci;
pub use params::HamiltonianParameters;

use nalgebra::{DMatrix, DVector};

use crate::error::Result;
use crate::fock_impl::FockSpace;

/// The capability interface of an implicit Hamiltonian operator.
///
/// Implementations never hold mutable state: every call recomputes from the
/// supplied integrals, which may change between calls (e.g. after an orbital
/// rotation).
pub trait HamiltonianBuilder {
    /// The addressing scheme this operator enumerates over
    fn fock_space(&self) -> &FockSpace;

    /// The orbital count the supplied integrals must have.
    ///
    /// Usually the addressing scheme's orbital count; frozen-core wrappers
    /// expect the integrals of the larger, unfrozen space.
    fn expected_orbital_count(&self) -> usize {
        self.fock_space().orbital_count()
    }

    /// The full dense Hamiltonian matrix
    fn construct_hamiltonian(&self, params: &HamiltonianParameters) -> Result<DMatrix<f64>>;

    /// The action of the Hamiltonian on a coefficient vector, without
    /// building the matrix. `diagonal` is the precomputed result of
    /// [`HamiltonianBuilder::calculate_diagonal`].
    fn matrix_vector_product(
        &self,
        params: &HamiltonianParameters,
        x: &DVector<f64>,
        diagonal: &DVector<f64>,
    ) -> Result<DVector<f64>>;

    /// The diagonal of the Hamiltonian matrix
    fn calculate_diagonal(&self, params: &HamiltonianParameters) -> Result<DVector<f64>>;
}
