//! Three-line result report written to standard output

use std::fmt;
use std::io::Write;
use std::time::Duration;

use crate::utils::errors::BenchError;

/// Decimal places printed for the π estimate.
pub const ESTIMATE_PRECISION: usize = 10;

/// Decimal places printed for the elapsed seconds.
pub const TIME_PRECISION: usize = 6;

/// Outcome of one timed run of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub estimate: f64,
    pub iterations: u64,
    pub elapsed: Duration,
}

impl Measurement {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "π ≈ {:.*}", ESTIMATE_PRECISION, self.estimate)?;
        writeln!(f, "Iterations: {}", self.iterations)?;
        writeln!(f, "Time: {:.*} seconds", TIME_PRECISION, self.elapsed_secs())
    }
}

/// Write the report and flush, so a closed pipe surfaces here instead of on drop.
pub fn write_report<W: Write>(measurement: &Measurement, mut out: W) -> Result<(), BenchError> {
    write!(out, "{measurement}")?;
    out.flush()?;
    Ok(())
}
