//! Addressing scheme module
//!
//! Links occupation-number vectors with dense integer addresses through a
//! combinatorial vertex-weight lattice, the addressing scheme of Molecular
//! Electronic-Structure Theory (Helgaker, Jørgensen, Olsen). Addresses sort
//! the configurations in ascending reverse-lexical numeric order, so the
//! whole space can be walked with a constant-time next-permutation step
//! while coupling addresses are updated incrementally instead of being
//! recomputed from scratch.

mod fock_space;

pub use fock_space::FockSpace;
