//! The full configuration space for a number of orbitals and electrons

use crate::error::{CiError, Result};
use crate::onv_impl::Onv;

/// The full space of all `C(K, N)` configurations of `N` electrons in `K`
/// spatial orbitals, together with the vertex-weight table that bijects
/// configurations to dense addresses in `[0, dim)`.
///
/// The table is built once and immutable afterwards; it is shared read-only
/// across all Hamiltonian constructions for the same orbital and electron
/// count.
#[derive(Debug, Clone)]
pub struct FockSpace {
    /// Number of spatial orbitals
    k: usize,

    /// Number of electrons
    n: usize,

    /// Dimension of the space, `C(K, N)`
    dim: usize,

    /// `vertex_weights[p][m]` is the arc weight for finding the m-th electron
    /// in orbital p; a (K+1) x (N+1) table
    vertex_weights: Vec<Vec<usize>>,
}

impl FockSpace {
    /// Build the addressing scheme for `n` electrons in `k` orbitals.
    pub fn new(k: usize, n: usize) -> Result<Self> {
        if k > 64 {
            return Err(CiError::InvalidConfiguration(format!(
                "representations are 64-bit, got K = {}",
                k
            )));
        }
        if n > k {
            return Err(CiError::InvalidConfiguration(format!(
                "cannot place N = {} electrons in K = {} orbitals",
                n, k
            )));
        }
        let dim = Self::calculate_dimension(k, n)?;

        // The weights of the first column are 1 for the first (K - N + 1)
        // vertices: each vertical move from (p, m) to (p+1, m) corresponds to
        // an unoccupied orbital, and at most K - N orbitals are unoccupied.
        let mut vertex_weights = vec![vec![0usize; n + 1]; k + 1];
        for row in vertex_weights.iter_mut().take(k - n + 1) {
            row[0] = 1;
        }

        // Every other weight is the sum of the weight vertically above and
        // the weight diagonally above: W(p, m) = W(p-1, m) + W(p-1, m-1).
        for m in 1..=n {
            for p in m..=(k - n + m) {
                vertex_weights[p][m] =
                    vertex_weights[p - 1][m] + vertex_weights[p - 1][m - 1];
            }
        }

        Ok(FockSpace {
            k,
            n,
            dim,
            vertex_weights,
        })
    }

    /// The binomial coefficient `C(k, n)`, i.e. the dimension of the space.
    ///
    /// Fails with [`CiError::Overflow`] when the result cannot be represented
    /// exactly in the address integer type.
    pub fn calculate_dimension(k: usize, n: usize) -> Result<usize> {
        if n > k {
            return Ok(0);
        }
        let n = n.min(k - n);
        let mut dim: u128 = 1;
        for i in 1..=n {
            dim = dim
                .checked_mul((k - n + i) as u128)
                .ok_or_else(|| {
                    CiError::Overflow(format!("C({}, {}) exceeds u128", k, n))
                })?
                / i as u128;
        }
        usize::try_from(dim).map_err(|_| {
            CiError::Overflow(format!(
                "C({}, {}) = {} does not fit the address type",
                k, n, dim
            ))
        })
    }

    /// Number of spatial orbitals
    pub fn orbital_count(&self) -> usize {
        self.k
    }

    /// Number of electrons
    pub fn electron_count(&self) -> usize {
        self.n
    }

    /// Dimension of the space
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// The vertex weight for finding the `m`-th electron in orbital `p`
    pub fn vertex_weight(&self, p: usize, m: usize) -> usize {
        self.vertex_weights[p][m]
    }

    /// The address (ordering number) of a given representation.
    ///
    /// Walks the set bits from least to most significant, adding the vertex
    /// weight of each encountered electron; O(N) in the electron count.
    pub fn address(&self, representation: u64) -> usize {
        let mut remainder = representation;
        let mut address = 0;
        let mut electron_count = 0;
        while remainder != 0 {
            let p = remainder.trailing_zeros() as usize;
            electron_count += 1;
            address += self.vertex_weights[p][electron_count];
            remainder &= remainder - 1; // clear the least significant bit
        }
        address
    }

    /// The representation whose address is `address`.
    ///
    /// Greedy descent from the highest orbital: whenever the remaining
    /// address can still pay the vertex weight at (p, m), orbital p is
    /// occupied.
    pub fn representation(&self, address: usize) -> u64 {
        let mut representation = 0u64;
        if self.n != 0 {
            let mut remainder = address;
            let mut m = self.n;
            for p in (0..self.k).rev() {
                let weight = self.vertex_weights[p][m];
                if weight <= remainder {
                    remainder -= weight;
                    representation |= 1u64 << p;
                    m -= 1;
                    if m == 0 {
                        break;
                    }
                }
            }
        }
        representation
    }

    /// The next bitstring with the same popcount.
    ///
    /// Starting from the minimal representation `2^N - 1`, repeated
    /// application enumerates all `C(K, N)` configurations in strictly
    /// ascending address order.
    ///
    /// ```text
    /// 011 -> 101
    /// 101 -> 110
    /// ```
    pub fn next_permutation(&self, representation: u64) -> u64 {
        // t gets the least significant 0 bits of the representation set to 1
        let t = representation | (representation - 1);

        // Set the most significant bit that has to change, clear the least
        // significant ones and append the ripple-carried 1 bits at the bottom.
        (t + 1) | (((!t & (t + 1)) - 1) >> (representation.trailing_zeros() + 1))
    }

    /// The ONV with the given address
    pub fn make_onv(&self, address: usize) -> Onv {
        Onv::from_raw(self.k, self.n, self.representation(address))
    }

    /// Advance an ONV to the next permutation in place
    pub fn set_next_onv(&self, onv: &mut Onv) {
        onv.set_representation(self.next_permutation(onv.representation()));
    }

    /// Advance the orbital cursor `q` and electron cursor `e` past any
    /// orbitals of `onv` that are still occupied, incrementally correcting
    /// `address` for the `annihilated` electrons that are no longer counted
    /// below that point.
    ///
    /// Each skipped orbital trades its original vertex weight for the weight
    /// of a path with `annihilated` fewer electrons, which is how the target
    /// address of an excitation is obtained in amortized O(1) per step.
    pub fn shift_until_next_unoccupied_orbital(
        &self,
        onv: &Onv,
        address: &mut usize,
        q: &mut usize,
        e: &mut usize,
        annihilated: usize,
    ) {
        while *e < self.n && *q == onv.occupation_index(*e) {
            // +1 on the electron cursor because the weight table counts
            // electrons starting from one
            let shift = self.vertex_weights[*q][*e + 1 - annihilated] as i64
                - self.vertex_weights[*q][*e + 1] as i64;
            *address = (*address as i64 + shift) as usize;
            *e += 1;
            *q += 1;
        }
    }

    /// [`FockSpace::shift_until_next_unoccupied_orbital`], additionally
    /// flipping `sign` once per skipped orbital (each skip passes a fermionic
    /// operator across one more occupied orbital).
    pub fn shift_until_next_unoccupied_orbital_signed(
        &self,
        onv: &Onv,
        address: &mut usize,
        q: &mut usize,
        e: &mut usize,
        sign: &mut i32,
        annihilated: usize,
    ) {
        while *e < self.n && *q == onv.occupation_index(*e) {
            let shift = self.vertex_weights[*q][*e + 1 - annihilated] as i64
                - self.vertex_weights[*q][*e + 1] as i64;
            *address = (*address as i64 + shift) as usize;
            *e += 1;
            *q += 1;
            *sign = -*sign;
        }
    }

    /// Backward variant of the shift: move the cursors down past occupied
    /// orbitals, correcting `address` for `created` extra electrons counted
    /// below that point and flipping `sign` once per skipped orbital.
    ///
    /// The cursors are signed because the walk terminates by running past
    /// electron 0 and orbital 0. Requires `e + 1 + created <= N` on entry.
    pub fn shift_until_previous_unoccupied_orbital_signed(
        &self,
        onv: &Onv,
        address: &mut usize,
        q: &mut isize,
        e: &mut isize,
        sign: &mut i32,
        created: usize,
    ) {
        while *e >= 0 && *q == onv.occupation_index(*e as usize) as isize {
            let m = (*e + 1) as usize;
            let shift = self.vertex_weights[*q as usize][m + created] as i64
                - self.vertex_weights[*q as usize][m] as i64;
            *address = (*address as i64 + shift) as usize;
            *e -= 1;
            *q -= 1;
            *sign = -*sign;
        }
    }

    /// The number of configurations with a strictly larger address that this
    /// ONV couples to through a one-electron operator.
    ///
    /// For each electron this is the number of unoccupied orbitals above it,
    /// in closed form: no enumeration.
    pub fn count_one_electron_couplings(&self, onv: &Onv) -> usize {
        let virtuals = self.k - self.n;
        let mut coupling_count = 0;
        for e1 in 0..self.n {
            let p = onv.occupation_index(e1);
            coupling_count += virtuals + e1 - p;
        }
        coupling_count
    }

    /// The number of configurations with a strictly larger address that this
    /// ONV couples to through a two-electron operator.
    pub fn count_two_electron_couplings(&self, onv: &Onv) -> usize {
        let virtuals = self.k - self.n;
        let mut coupling_count = 0;

        for e1 in 0..self.n {
            let p = onv.occupation_index(e1);
            coupling_count += virtuals + e1 - p; // one-electron part

            for e2 in (e1 + 1)..self.n {
                let q = onv.occupation_index(e2);
                let virtuals_above = virtuals + e2 - q;
                coupling_count += (virtuals - virtuals_above) * virtuals_above;

                if virtuals_above > 1 {
                    // both electrons land above q
                    coupling_count += virtuals_above * (virtuals_above - 1) / 2;
                }
            }
        }

        coupling_count
    }

    /// The total number of non-zero off-diagonal one-electron couplings in
    /// the whole space, via a combinatorial identity.
    pub fn count_total_one_electron_couplings(&self) -> usize {
        (self.k - self.n) * self.n * self.dim
    }

    /// The total number of non-zero off-diagonal two-electron couplings in
    /// the whole space, via a combinatorial identity.
    pub fn count_total_two_electron_couplings(&self) -> usize {
        let virtuals = self.k - self.n;
        let mut two_electron_permutations = 0;
        if virtuals >= 2 {
            two_electron_permutations =
                virtuals * (virtuals - 1) / 2 * self.n * (self.n - 1) * self.dim / 2;
        }
        two_electron_permutations + self.count_total_one_electron_couplings()
    }
}
