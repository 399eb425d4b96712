//! Output formatting and logging utilities

use std::fs::File;
use std::io::Write;
use std::sync::Arc;

use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use doci::Eigenpair;

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => {
            if let Ok(log) = File::create(path) {
                let file_layer = layer()
                    .with_writer(Arc::new(log))
                    .with_target(false)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            } else {
                eprintln!("Could not create output file: {}", path);
            }
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
            info!("Output will be printed to stdout");
        }
    }
}

/// Print the solved eigenpairs to a writer
///
/// # Arguments
/// * `writer` - where to print
/// * `eigenpairs` - the solved eigenpairs, lowest first
/// * `scalar` - the scalar energy offset to add to each eigenvalue
pub fn print_eigenpairs<W: Write>(
    writer: &mut W,
    eigenpairs: &[Eigenpair],
    scalar: f64,
) -> Result<()> {
    writeln!(writer, "Solved {} eigenpair(s):", eigenpairs.len())?;
    for (state, pair) in eigenpairs.iter().enumerate() {
        writeln!(
            writer,
            "  state {}: energy = {:.12}",
            state,
            pair.eigenvalue + scalar
        )?;
    }
    Ok(())
}
