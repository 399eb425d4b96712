//! Occupation-number vector (ONV) module
//!
//! An ONV encodes one many-body basis determinant as a bitmask over spatial
//! orbitals, read in reverse lexical order: the least significant bit belongs
//! to orbital 0. Creation and annihilation operators act in place and track
//! the fermionic phase that arises from reordering past occupied orbitals.

mod onv;

pub use onv::Onv;
