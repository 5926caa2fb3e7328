use thiserror::Error;

/// Errors surfaced by reporting and the benchmark harness.
///
/// The series computation itself cannot fail; everything here comes from
/// getting results out of the process.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize benchmark result: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot compare against benchmark `{name}`: baseline mean is zero")]
    ZeroBaseline { name: String },
}
