//! Wall-clock timing around a single computation

use std::time::{Duration, Instant};

use tracing::debug;

use crate::leibniz::calculate_pi;
use crate::runtime::report::Measurement;

/// Result of a timed closure together with how long it took
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Run `f`, sampling the monotonic clock immediately before and after.
pub fn time_it<T, F>(f: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();

    Timed { value, elapsed }
}

/// Time one evaluation of the series with `iterations` terms.
#[must_use]
pub fn measure(iterations: u64) -> Measurement {
    debug!(iterations, "starting leibniz run");
    let Timed { value, elapsed } = time_it(|| calculate_pi(iterations));
    debug!(estimate = value, elapsed_secs = elapsed.as_secs_f64(), "leibniz run finished");

    Measurement {
        estimate: value,
        iterations,
        elapsed,
    }
}
