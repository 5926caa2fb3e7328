use std::io;

use anyhow::{Context, Result};
use tracing::info;

use crate::leibniz::ITERATIONS;
use crate::runtime::report::write_report;
use crate::runtime::timing::measure;
use crate::utils::logger;

/// Time one full-length run and print the report to stdout.
///
/// Command-line arguments and the environment are not consulted.
pub fn run() -> Result<()> {
    logger::init_logging();

    let measurement = measure(ITERATIONS);
    info!(
        iterations = measurement.iterations,
        elapsed_secs = measurement.elapsed_secs(),
        "measurement complete"
    );

    write_report(&measurement, io::stdout().lock()).context("failed to print results")?;
    Ok(())
}
