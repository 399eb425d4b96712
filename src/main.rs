//! DOCI Calculation Command-Line Interface
//!
//! This is the main entry point for running doubly-occupied CI calculations
//! on the picket-fence pairing model with YAML configuration.

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use std::fs;
use tracing::info;

mod config;
mod io;

use config::{Args, Config};
use doci::{CiSolver, Doci, FockSpace, FrozenCoreDoci, HamiltonianBuilder, HamiltonianParameters};
use io::{print_eigenpairs, setup_output};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_output(args.output.as_ref());

    // Load and parse configuration
    info!("Reading configuration from: {}", args.config_file);
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;
    let config: Config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();
    info!("Configuration loaded:\n{:?}", config);

    let orbitals = config.system.orbitals;
    let pairs = config.system.electron_pairs;
    let frozen = args
        .frozen_orbitals
        .or(config.system.frozen_orbitals)
        .unwrap_or(0);
    if frozen > pairs {
        return Err(eyre!(
            "cannot freeze {} orbitals with only {} electron pairs",
            frozen,
            pairs
        ));
    }

    let model = &config.model;
    let params = HamiltonianParameters::pairing_model(
        orbitals,
        model.level_spacing.unwrap(),
        model.coupling_strength.unwrap(),
    )?;
    info!(
        "Pairing model: {} levels, {} pairs, spacing {}, coupling {}",
        orbitals,
        pairs,
        model.level_spacing.unwrap(),
        model.coupling_strength.unwrap()
    );

    let active_space = FockSpace::new(orbitals - frozen, pairs - frozen)?;
    info!(
        "Configuration space dimension: {}",
        active_space.dimension()
    );

    let builder: Box<dyn HamiltonianBuilder + '_> = if frozen > 0 {
        info!("Freezing the lowest {} orbitals", frozen);
        Box::new(FrozenCoreDoci::new(
            Box::new(Doci::new(&active_space)),
            frozen,
        ))
    } else {
        Box::new(Doci::new(&active_space))
    };
    let solver = CiSolver::new(builder.as_ref(), &params)?;

    let davidson_params = config.davidson.clone().unwrap_or_default();
    let options = davidson_params.to_options(args.eigenpairs);

    let method = args
        .method
        .clone()
        .or_else(|| config.method.clone())
        .unwrap_or_else(|| "davidson".to_string());
    let eigenpairs = match method.as_str() {
        "davidson" => {
            info!("Solving with the Davidson iteration");
            solver.solve_davidson(&options, None)?
        }
        "dense" => {
            info!("Solving with a dense diagonalization");
            solver.solve_dense(options.number_of_requested_eigenpairs)?
        }
        other => return Err(eyre!("Unknown solver method: {}", other)),
    };

    info!(
        "Ground state energy: {:.12}",
        eigenpairs[0].eigenvalue + params.scalar()
    );
    print_eigenpairs(&mut std::io::stdout(), &eigenpairs, params.scalar())?;

    Ok(())
}
