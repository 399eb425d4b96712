use nalgebra::DMatrix;
use ndarray::{Array4, s};

use crate::error::{CiError, Result};

/// The one- and two-electron integrals (in an orthonormal spatial orbital
/// basis) plus a scalar offset, e.g. the nuclear repulsion energy.
///
/// The two-electron integrals g(p,q,r,s) are stored in chemist's notation
/// (pq|rs) and are assumed to carry the eightfold permutation symmetry of
/// real orbitals.
#[derive(Debug, Clone)]
pub struct HamiltonianParameters {
    h: DMatrix<f64>,
    g: Array4<f64>,
    scalar: f64,
}

impl HamiltonianParameters {
    /// Construct Hamiltonian parameters from their integral representation
    ///
    /// # Arguments
    /// * `h` - the one-electron integrals, a K x K matrix
    /// * `g` - the two-electron integrals, a K x K x K x K tensor
    /// * `scalar` - a scalar energy offset
    pub fn new(h: DMatrix<f64>, g: Array4<f64>, scalar: f64) -> Result<Self> {
        let k = h.nrows();
        if h.ncols() != k {
            return Err(CiError::InvalidConfiguration(format!(
                "the one-electron integrals must be square, got {} x {}",
                h.nrows(),
                h.ncols()
            )));
        }
        if g.dim() != (k, k, k, k) {
            return Err(CiError::InvalidConfiguration(format!(
                "the two-electron integrals must be {k} x {k} x {k} x {k}, got {:?}",
                g.dim()
            )));
        }

        Ok(Self { h, g, scalar })
    }

    /// Parameters for a picket-fence pairing model: K equidistant levels
    /// with spacing `spacing` and a constant pair coupling `-strength`
    /// between every pair of levels.
    pub fn pairing_model(k: usize, spacing: f64, strength: f64) -> Result<Self> {
        if k == 0 {
            return Err(CiError::InvalidConfiguration(
                "a pairing model needs at least one level".to_string(),
            ));
        }

        let mut h = DMatrix::zeros(k, k);
        for p in 0..k {
            h[(p, p)] = spacing * (p as f64);
        }

        let mut g = Array4::zeros((k, k, k, k));
        for p in 0..k {
            for q in 0..k {
                // the full permutation orbit of (pq|pq), so the tensor
                // keeps its eightfold symmetry
                g[(p, q, p, q)] = -strength;
                g[(p, q, q, p)] = -strength;
                g[(q, p, p, q)] = -strength;
                g[(q, p, q, p)] = -strength;
            }
        }

        Self::new(h, g, 0.0)
    }

    /// The number of spatial orbitals
    pub fn orbital_count(&self) -> usize {
        self.h.nrows()
    }

    /// The one-electron integrals h(p,q)
    pub fn h(&self) -> &DMatrix<f64> {
        &self.h
    }

    /// The two-electron integrals g(p,q,r,s)
    pub fn g(&self) -> &Array4<f64> {
        &self.g
    }

    /// The scalar energy offset
    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Transform the integrals to the orbital basis spanned by the columns
    /// of the unitary matrix `u`: h' = Ut h U, and g' contracted with U on
    /// all four indices.
    pub fn rotate(&mut self, u: &DMatrix<f64>) -> Result<()> {
        let k = self.orbital_count();
        if u.nrows() != k || u.ncols() != k {
            return Err(CiError::InvalidConfiguration(format!(
                "the rotation matrix must be {k} x {k}, got {} x {}",
                u.nrows(),
                u.ncols()
            )));
        }
        if (u.transpose() * u - DMatrix::identity(k, k)).norm() > 1.0e-10 {
            return Err(CiError::InvalidConfiguration(
                "the rotation matrix is not unitary".to_string(),
            ));
        }

        self.h = u.transpose() * &self.h * u;

        // transform one index at a time, s -> r -> q -> p
        let mut current = self.g.clone();
        for index in (0..4).rev() {
            let mut next = Array4::zeros((k, k, k, k));
            for p in 0..k {
                for q in 0..k {
                    for r in 0..k {
                        for s_out in 0..k {
                            let mut value = 0.0;
                            for t in 0..k {
                                let element = match index {
                                    0 => current[(t, q, r, s_out)],
                                    1 => current[(p, t, r, s_out)],
                                    2 => current[(p, q, t, s_out)],
                                    _ => current[(p, q, r, t)],
                                };
                                let transformed = match index {
                                    0 => u[(t, p)],
                                    1 => u[(t, q)],
                                    2 => u[(t, r)],
                                    _ => u[(t, s_out)],
                                };
                                value += element * transformed;
                            }
                            next[(p, q, r, s_out)] = value;
                        }
                    }
                }
            }
            current = next;
        }
        self.g = current;

        Ok(())
    }

    /// Restrict the integrals to the orbitals starting at `start`, i.e. drop
    /// the first `start` rows and columns of every index.
    pub(crate) fn restricted_to(&self, start: usize) -> (DMatrix<f64>, Array4<f64>) {
        let k_active = self.orbital_count() - start;
        let h_active = self
            .h
            .view((start, start), (k_active, k_active))
            .into_owned();
        let g_active = self
            .g
            .slice(s![start.., start.., start.., start..])
            .to_owned();
        (h_active, g_active)
    }
}
