use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{CiError, Result};
use crate::fock_impl::FockSpace;

use super::{HamiltonianBuilder, HamiltonianParameters};

/// A Hamiltonian operator in which the lowest `frozen_orbital_count`
/// spatial orbitals are kept doubly occupied in every configuration.
///
/// The wrapper receives integrals over the full orbital space, folds the
/// frozen orbitals into effective integrals over the remaining active
/// orbitals, delegates to the wrapped builder and shifts every diagonal
/// element by the constant energy of the frozen core.
pub struct FrozenCoreDoci<'a> {
    active_builder: Box<dyn HamiltonianBuilder + 'a>,
    frozen_orbital_count: usize,
}

impl<'a> FrozenCoreDoci<'a> {
    /// # Arguments
    /// * `active_builder` - the operator over the active configuration space
    /// * `frozen_orbital_count` - the number of frozen doubly-occupied orbitals
    pub fn new(
        active_builder: Box<dyn HamiltonianBuilder + 'a>,
        frozen_orbital_count: usize,
    ) -> Self {
        Self {
            active_builder,
            frozen_orbital_count,
        }
    }

    /// Effective integrals over the active orbitals.
    ///
    /// The one-electron integrals absorb the mean field of the frozen
    /// orbitals, the two-electron integrals are restricted to active
    /// indices and the scalar offset passes through unchanged.
    pub fn freeze_parameters(
        &self,
        params: &HamiltonianParameters,
    ) -> Result<HamiltonianParameters> {
        let x = self.frozen_orbital_count;
        let g = params.g();

        let (mut h_active, g_active) = params.restricted_to(x);
        let k_active = h_active.nrows();

        for i in 0..k_active {
            let q = i + x;
            for l in 0..x {
                h_active[(i, i)] += g[(q, q, l, l)] + g[(l, l, q, q)]
                    - g[(q, l, l, q)] / 2.0
                    - g[(l, q, q, l)] / 2.0;
            }

            for j in (i + 1)..k_active {
                let p = j + x;
                for l in 0..x {
                    h_active[(i, j)] += g[(q, p, l, l)] + g[(l, l, q, p)]
                        - g[(q, l, l, p)] / 2.0
                        - g[(l, p, q, l)] / 2.0;
                    h_active[(j, i)] += g[(p, q, l, l)] + g[(l, l, p, q)]
                        - g[(p, l, l, q)] / 2.0
                        - g[(l, q, p, l)] / 2.0;
                }
            }
        }

        HamiltonianParameters::new(h_active, g_active, params.scalar())
    }

    /// The constant energy of the doubly-occupied frozen orbitals
    pub fn frozen_core_value(&self, params: &HamiltonianParameters) -> f64 {
        let x = self.frozen_orbital_count;
        let h = params.h();
        let g = params.g();

        let mut value = 0.0;
        for i in 0..x {
            value += 2.0 * h[(i, i)] + g[(i, i, i, i)];

            for j in (i + 1)..x {
                value += 2.0 * g[(i, i, j, j)] + 2.0 * g[(j, j, i, i)]
                    - g[(j, i, i, j)]
                    - g[(i, j, j, i)];
            }
        }
        value
    }

    fn validate(&self, params: &HamiltonianParameters) -> Result<()> {
        if params.orbital_count() != self.expected_orbital_count() {
            return Err(CiError::InvalidConfiguration(format!(
                "the integrals are defined for {} orbitals but {} frozen plus {} active were expected",
                params.orbital_count(),
                self.frozen_orbital_count,
                self.active_builder.fock_space().orbital_count()
            )));
        }
        Ok(())
    }
}

impl HamiltonianBuilder for FrozenCoreDoci<'_> {
    /// The active configuration space; the frozen orbitals are not part of
    /// the enumeration.
    fn fock_space(&self) -> &FockSpace {
        self.active_builder.fock_space()
    }

    fn expected_orbital_count(&self) -> usize {
        self.active_builder.fock_space().orbital_count() + self.frozen_orbital_count
    }

    fn construct_hamiltonian(&self, params: &HamiltonianParameters) -> Result<DMatrix<f64>> {
        self.validate(params)?;
        debug!(
            "Folding {} frozen orbitals into the active Hamiltonian",
            self.frozen_orbital_count
        );

        let frozen = self.freeze_parameters(params)?;
        let value = self.frozen_core_value(params);

        let mut matrix = self.active_builder.construct_hamiltonian(&frozen)?;
        for i in 0..matrix.nrows() {
            matrix[(i, i)] += value;
        }
        Ok(matrix)
    }

    fn matrix_vector_product(
        &self,
        params: &HamiltonianParameters,
        x: &DVector<f64>,
        diagonal: &DVector<f64>,
    ) -> Result<DVector<f64>> {
        self.validate(params)?;

        // the frozen-core shift rides along inside the supplied diagonal
        let frozen = self.freeze_parameters(params)?;
        self.active_builder.matrix_vector_product(&frozen, x, diagonal)
    }

    fn calculate_diagonal(&self, params: &HamiltonianParameters) -> Result<DVector<f64>> {
        self.validate(params)?;

        let frozen = self.freeze_parameters(params)?;
        let value = self.frozen_core_value(params);

        let diagonal = self.active_builder.calculate_diagonal(&frozen)?;
        Ok(diagonal.add_scalar(value))
    }
}
