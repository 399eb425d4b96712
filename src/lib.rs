//! Matrix-free doubly-occupied configuration interaction (DOCI)
//!
//! The building blocks are occupation-number vectors ([`Onv`]), the
//! vertex-weight addressing scheme over them ([`FockSpace`]), implicit
//! Hamiltonian operators ([`Doci`], [`FrozenCoreDoci`]) and the
//! Davidson-Liu eigensolver ([`DavidsonSolver`]), tied together by
//! [`CiSolver`].

pub mod davidson_impl;
pub mod error;
pub mod fock_impl;
pub mod hamiltonian_impl;
pub mod onv_impl;
pub mod solver;

pub use davidson_impl::{DavidsonOptions, DavidsonSolver, Eigenpair};
pub use error::{CiError, Result};
pub use fock_impl::FockSpace;
pub use hamiltonian_impl::{Doci, FrozenCoreDoci, HamiltonianBuilder, HamiltonianParameters};
pub use onv_impl::Onv;
pub use solver::CiSolver;
