//! Input/Output operations for DOCI calculations
//!
//! This module handles logging setup and result formatting.

mod output;

pub use output::{print_eigenpairs, setup_output};
