//! Leibniz series: π/4 = 1 − 1/3 + 1/5 − 1/7 + …

/// Number of series terms summed by the benchmark.
pub const ITERATIONS: u64 = 100_000_000;

/// Approximate π from the first `iterations` terms of the Leibniz series.
///
/// Terms are accumulated strictly in order `k = 0, 1, …, iterations - 1`.
/// Floating-point addition is not associative, so any reordering (a
/// parallel reduction, for instance) changes the low digits of the result.
///
/// Zero iterations is the empty sum and yields `0.0`.
#[must_use]
pub fn calculate_pi(iterations: u64) -> f64 {
    let mut sum = 0.0_f64;
    let mut sign: i32 = 1;

    for k in 0..iterations {
        sum += f64::from(sign) / (2.0 * k as f64 + 1.0);
        sign = -sign;
    }

    sum * 4.0
}
