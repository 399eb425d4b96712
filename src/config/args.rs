//! Command-line argument parsing for DOCI calculations

use clap::Parser;

/// Matrix-free DOCI calculation with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override the solver method (davidson or dense)
    #[arg(long)]
    pub method: Option<String>,

    /// Override the number of requested eigenpairs
    #[arg(long)]
    pub eigenpairs: Option<usize>,

    /// Override the number of frozen orbitals
    #[arg(long)]
    pub frozen_orbitals: Option<usize>,

    /// Output file (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}
