//! Measurement, reporting, and the repeated-run benchmark harness.

pub mod benchmark;
pub mod report;
pub mod timing;
