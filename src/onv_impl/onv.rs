//! Core ONV implementation

use std::fmt;

use crate::error::{CiError, Result};

/// A bit-packed occupation-number vector for `N` electrons in `K` spatial
/// orbitals.
///
/// The representation uses reverse lexical notation: bit `p` (counting from
/// the least significant bit) is set when orbital `p` is occupied. Next to
/// the raw bitmask, an ascending list of occupied orbital indices is kept so
/// that "the orbital of electron `e`" is an O(1) lookup during coupling
/// enumeration. The mutating operators below deliberately do *not* refresh
/// that list; callers batch their mutations and then call
/// [`Onv::update_occupation_indices`] once.
#[derive(Debug, Clone)]
pub struct Onv {
    /// Number of spatial orbitals
    k: usize,

    /// Number of electrons
    n: usize,

    /// Unsigned bitmask representation of the occupations
    representation: u64,

    /// `occupation_indices[e]` is the orbital index occupied by electron `e`,
    /// in strictly ascending order
    occupation_indices: Vec<usize>,
}

impl Onv {
    /// Build an ONV from an orbital count, an electron count and a raw
    /// bitmask.
    ///
    /// Fails when the bitmask does not address exactly `n` out of `k`
    /// orbitals.
    pub fn new(k: usize, n: usize, representation: u64) -> Result<Self> {
        if k > 64 {
            return Err(CiError::InvalidConfiguration(format!(
                "an ONV stores at most 64 orbitals, got K = {}",
                k
            )));
        }
        if k < 64 && representation >= (1u64 << k) {
            return Err(CiError::InvalidConfiguration(format!(
                "representation {:#b} addresses orbitals beyond K = {}",
                representation, k
            )));
        }
        if representation.count_ones() as usize != n {
            return Err(CiError::InvalidConfiguration(format!(
                "representation {:#b} occupies {} orbitals, expected N = {}",
                representation,
                representation.count_ones(),
                n
            )));
        }

        let mut onv = Onv {
            k,
            n,
            representation,
            occupation_indices: Vec::with_capacity(n),
        };
        onv.update_occupation_indices();
        Ok(onv)
    }

    /// Build an ONV whose representation is already known to be consistent,
    /// e.g. one produced by an addressing scheme.
    pub(crate) fn from_raw(k: usize, n: usize, representation: u64) -> Self {
        debug_assert_eq!(representation.count_ones() as usize, n);
        let mut onv = Onv {
            k,
            n,
            representation,
            occupation_indices: Vec::with_capacity(n),
        };
        onv.update_occupation_indices();
        onv
    }

    /// Number of spatial orbitals
    pub fn orbital_count(&self) -> usize {
        self.k
    }

    /// Number of electrons
    pub fn electron_count(&self) -> usize {
        self.n
    }

    /// The raw bitmask
    pub fn representation(&self) -> u64 {
        self.representation
    }

    /// Replace the bitmask and resynchronize the occupation indices.
    ///
    /// The new representation must keep the same popcount; this is the hot
    /// path of the enumeration loops, so the invariant is only checked in
    /// debug builds.
    pub fn set_representation(&mut self, representation: u64) {
        debug_assert_eq!(representation.count_ones() as usize, self.n);
        self.representation = representation;
        self.update_occupation_indices();
    }

    /// The orbital index occupied by electron `e` (electron 0 sits in the
    /// lowest occupied orbital).
    pub fn occupation_index(&self, e: usize) -> usize {
        self.occupation_indices[e]
    }

    /// Extract the positions of the set bits into the occupation-index list.
    ///
    /// Must be called after any batch of raw bit mutations through
    /// [`Onv::annihilate`]/[`Onv::create`] before the indices are read again.
    pub fn update_occupation_indices(&mut self) {
        self.occupation_indices.clear();
        let mut remainder = self.representation;
        while remainder != 0 {
            self.occupation_indices
                .push(remainder.trailing_zeros() as usize);
            remainder &= remainder - 1;
        }
    }

    /// Whether orbital `p` is occupied
    pub fn is_occupied(&self, p: usize) -> bool {
        self.representation & (1u64 << p) != 0
    }

    /// Annihilate an electron in orbital `p` (clear the bit).
    ///
    /// Returns false and leaves the ONV untouched when `p` is unoccupied.
    /// Does not update the occupation indices.
    pub fn annihilate(&mut self, p: usize) -> bool {
        if self.is_occupied(p) {
            self.representation &= !(1u64 << p);
            true
        } else {
            false
        }
    }

    /// Annihilate an electron in orbital `p`, multiplying `sign` by the
    /// fermionic phase factor of the operator before the bit is cleared.
    ///
    /// Does not update the occupation indices.
    pub fn annihilate_signed(&mut self, p: usize, sign: &mut i32) -> bool {
        if self.is_occupied(p) {
            *sign *= self.operator_phase_factor(p);
            self.representation &= !(1u64 << p);
            true
        } else {
            false
        }
    }

    /// Create an electron in orbital `p` (set the bit).
    ///
    /// Returns false and leaves the ONV untouched when `p` is already
    /// occupied. Does not update the occupation indices.
    pub fn create(&mut self, p: usize) -> bool {
        if !self.is_occupied(p) {
            self.representation |= 1u64 << p;
            true
        } else {
            false
        }
    }

    /// Create an electron in orbital `p`, multiplying `sign` by the fermionic
    /// phase factor of the operator.
    ///
    /// Does not update the occupation indices.
    pub fn create_signed(&mut self, p: usize, sign: &mut i32) -> bool {
        if !self.is_occupied(p) {
            *sign *= self.operator_phase_factor(p);
            self.representation |= 1u64 << p;
            true
        } else {
            false
        }
    }

    /// The phase factor (+1 or -1) that arises when an annihilation or
    /// creation operator acts on orbital `p`.
    ///
    /// An operator on orbital `p` anticommutes past every occupied orbital
    /// with a lower index: with m such orbitals the factor is (-1)^m.
    pub fn operator_phase_factor(&self, p: usize) -> i32 {
        let below = self.representation & ((1u64 << p) - 1);
        if below.count_ones() % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// The sub-bitmask covering orbitals `[start, end)`.
    ///
    /// Both bounds are lexical (i.e. counted from the least significant bit),
    /// so the slice reads the same way the full string does:
    /// "010011".slice(1, 4) gives "001".
    pub fn slice(&self, start: usize, end: usize) -> u64 {
        debug_assert!(start < end && end <= self.k);
        let width = end - start;
        let mask = if width == 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        (self.representation >> start) & mask
    }
}

impl PartialEq for Onv {
    fn eq(&self, other: &Self) -> bool {
        self.representation == other.representation
    }
}

impl Eq for Onv {}

impl fmt::Display for Onv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in (0..self.k).rev() {
            write!(f, "{}", if self.is_occupied(p) { '1' } else { '0' })?;
        }
        Ok(())
    }
}
