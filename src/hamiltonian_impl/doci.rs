use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{CiError, Result};
use crate::fock_impl::FockSpace;
use crate::onv_impl::Onv;

use super::{HamiltonianBuilder, HamiltonianParameters};

/// The seniority-zero (doubly-occupied) Hamiltonian operator.
///
/// Every configuration is a set of N doubly-occupied spatial orbitals out of
/// K, represented by one ONV over the N electron pairs. Because both spin
/// branches of an excitation move together, every coupling phase factor is
/// (+1)^2 and the usual sign bookkeeping drops out: the only non-zero
/// off-diagonal elements are the pair-hopping integrals g(p,q,p,q).
pub struct Doci<'a> {
    fock_space: &'a FockSpace,
}

impl<'a> Doci<'a> {
    /// # Arguments
    /// * `fock_space` - the pair addressing scheme to enumerate over
    pub fn new(fock_space: &'a FockSpace) -> Self {
        Self { fock_space }
    }

    fn validate(&self, params: &HamiltonianParameters) -> Result<()> {
        if params.orbital_count() != self.fock_space.orbital_count() {
            return Err(CiError::InvalidConfiguration(format!(
                "the integrals are defined for {} orbitals but the configuration space has {}",
                params.orbital_count(),
                self.fock_space.orbital_count()
            )));
        }
        Ok(())
    }

    /// The diagonal element for one configuration
    fn diagonal_element(&self, params: &HamiltonianParameters, onv: &Onv) -> f64 {
        let h = params.h();
        let g = params.g();

        let mut value = 0.0;
        for e1 in 0..self.fock_space.electron_count() {
            let p = onv.occupation_index(e1);
            value += 2.0 * h[(p, p)] + g[(p, p, p, p)];

            for e2 in 0..e1 {
                let q = onv.occupation_index(e2);
                value += 2.0 * (2.0 * g[(p, p, q, q)] - g[(p, q, q, p)]);
            }
        }
        value
    }

    /// Visit every pair excitation out of `onv`, which sits at address `i`.
    ///
    /// The callback receives the excited address J > I and the coupling
    /// strength g(p,q,p,q).
    fn for_each_coupling<F>(
        &self,
        params: &HamiltonianParameters,
        onv: &Onv,
        i: usize,
        mut callback: F,
    ) where
        F: FnMut(usize, f64),
    {
        let k = self.fock_space.orbital_count();
        let n = self.fock_space.electron_count();
        let g = params.g();

        for e1 in 0..n {
            let p = onv.occupation_index(e1);

            // annihilate the pair in p and walk the creation cursor up
            let mut address = i - self.fock_space.vertex_weight(p, e1 + 1);
            let mut e2 = e1 + 1;
            let mut q = p + 1;
            self.fock_space
                .shift_until_next_unoccupied_orbital(onv, &mut address, &mut q, &mut e2, 1);

            while q < k {
                let j = address + self.fock_space.vertex_weight(q, e2);
                callback(j, g[(p, q, p, q)]);

                q += 1;
                self.fock_space
                    .shift_until_next_unoccupied_orbital(onv, &mut address, &mut q, &mut e2, 1);
            }
        }
    }
}

impl HamiltonianBuilder for Doci<'_> {
    fn fock_space(&self) -> &FockSpace {
        self.fock_space
    }

    fn construct_hamiltonian(&self, params: &HamiltonianParameters) -> Result<DMatrix<f64>> {
        self.validate(params)?;

        let dim = self.fock_space.dimension();
        debug!("Building the dense Hamiltonian ({} x {})", dim, dim);

        let diagonal = self.calculate_diagonal(params)?;
        let mut matrix = DMatrix::zeros(dim, dim);

        let mut onv = self.fock_space.make_onv(0);
        for i in 0..dim {
            matrix[(i, i)] = diagonal[i];

            self.for_each_coupling(params, &onv, i, |j, coupling| {
                matrix[(i, j)] += coupling;
                matrix[(j, i)] += coupling;
            });

            if i < dim - 1 {
                self.fock_space.set_next_onv(&mut onv);
            }
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

        let dim = self.fock_space.dimension();
        if x.len() != dim || diagonal.len() != dim {
            return Err(CiError::InvalidConfiguration(format!(
                "the coefficient vector and diagonal must have length {dim}, got {} and {}",
                x.len(),
                diagonal.len()
            )));
        }

        let mut matvec = diagonal.component_mul(x);

        let mut onv = self.fock_space.make_onv(0);
        for i in 0..dim {
            self.for_each_coupling(params, &onv, i, |j, coupling| {
                matvec[i] += coupling * x[j];
                matvec[j] += coupling * x[i];
            });

            if i < dim - 1 {
                self.fock_space.set_next_onv(&mut onv);
            }
        }

        Ok(matvec)
    }

    fn calculate_diagonal(&self, params: &HamiltonianParameters) -> Result<DVector<f64>> {
        self.validate(params)?;

        let dim = self.fock_space.dimension();
        let mut diagonal = DVector::zeros(dim);

        let mut onv = self.fock_space.make_onv(0);
        for i in 0..dim {
            diagonal[i] = self.diagonal_element(params, &onv);

            if i < dim - 1 {
                self.fock_space.set_next_onv(&mut onv);
            }
        }

        Ok(diagonal)
    }
}
