//! Leibniz-series π micro-benchmark.
//!
//! The binary (`pi_leibniz`) approximates π with a fixed number of series
//! terms, times the computation, and prints a three-line report. The library
//! exposes the pieces separately so they can be tested and reused by the
//! repeated-measurement harness in [`runtime::benchmark`].

pub mod cli;
pub mod leibniz;
pub mod runtime;
pub mod utils;

pub use leibniz::{ITERATIONS, calculate_pi};
pub use runtime::report::{Measurement, write_report};
pub use runtime::timing::{Timed, measure, time_it};
