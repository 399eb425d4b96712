//! Configuration management for DOCI calculations
//!
//! This module handles the YAML configuration structures and their defaults.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};

use doci::DavidsonOptions;

/// Main configuration structure for a DOCI calculation
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub system: SystemParams,
    pub model: ModelParams,
    pub davidson: Option<DavidsonParams>,
    /// Solver method, "davidson" or "dense"
    pub method: Option<String>,
}

impl Config {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        self.model = self.model.with_defaults();
        self.davidson = Some(self.davidson.unwrap_or_default().with_defaults());
        if self.method.is_none() {
            self.method = Some("davidson".to_string());
        }
        self
    }
}

/// The orbital space and its occupation
#[derive(Debug, Deserialize, Serialize)]
pub struct SystemParams {
    pub orbitals: usize,
    pub electron_pairs: usize,
    pub frozen_orbitals: Option<usize>,
}

/// Picket-fence pairing model parameters
#[derive(Debug, Deserialize, Serialize)]
pub struct ModelParams {
    pub level_spacing: Option<f64>,
    pub coupling_strength: Option<f64>,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams {
            level_spacing: Some(1.0),
            coupling_strength: Some(0.5),
        }
    }
}

impl ModelParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.level_spacing.is_none() {
            self.level_spacing = defaults.level_spacing;
        }
        if self.coupling_strength.is_none() {
            self.coupling_strength = defaults.coupling_strength;
        }
        self
    }
}

/// Davidson-specific parameters
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct DavidsonParams {
    pub requested_eigenpairs: Option<usize>,
    pub convergence_threshold: Option<f64>,
    pub correction_threshold: Option<f64>,
    pub maximum_subspace_dimension: Option<usize>,
    pub collapsed_subspace_dimension: Option<usize>,
    pub maximum_iterations: Option<usize>,
}

impl DavidsonParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = DavidsonOptions::default();
        if self.requested_eigenpairs.is_none() {
            self.requested_eigenpairs = Some(defaults.number_of_requested_eigenpairs);
        }
        if self.convergence_threshold.is_none() {
            self.convergence_threshold = Some(defaults.convergence_threshold);
        }
        if self.correction_threshold.is_none() {
            self.correction_threshold = Some(defaults.correction_threshold);
        }
        if self.maximum_subspace_dimension.is_none() {
            self.maximum_subspace_dimension = Some(defaults.maximum_subspace_dimension);
        }
        if self.collapsed_subspace_dimension.is_none() {
            self.collapsed_subspace_dimension = Some(defaults.collapsed_subspace_dimension);
        }
        if self.maximum_iterations.is_none() {
            self.maximum_iterations = Some(defaults.maximum_number_of_iterations);
        }
        self
    }

    /// The solver options these parameters describe.
    ///
    /// The collapsed subspace is widened when needed so it can always hold
    /// the requested eigenpairs.
    pub fn to_options(&self, requested_override: Option<usize>) -> DavidsonOptions {
        let defaults = DavidsonOptions::default();
        let requested = requested_override
            .or(self.requested_eigenpairs)
            .unwrap_or(defaults.number_of_requested_eigenpairs);
        let collapsed = self
            .collapsed_subspace_dimension
            .unwrap_or(defaults.collapsed_subspace_dimension)
            .max(requested);

        DavidsonOptions {
            number_of_requested_eigenpairs: requested,
            convergence_threshold: self
                .convergence_threshold
                .unwrap_or(defaults.convergence_threshold),
            correction_threshold: self
                .correction_threshold
                .unwrap_or(defaults.correction_threshold),
            maximum_subspace_dimension: self
                .maximum_subspace_dimension
                .unwrap_or(defaults.maximum_subspace_dimension)
                .max(collapsed + 1),
            collapsed_subspace_dimension: collapsed,
            maximum_number_of_iterations: self
                .maximum_iterations
                .unwrap_or(defaults.maximum_number_of_iterations),
        }
    }
}
