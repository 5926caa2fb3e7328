//! Repeated-run benchmarking of the series computation
//!
//! The entry point times a single run. This harness is for comparing builds
//! or machines: it warms up, measures many runs, and summarizes them.

use std::collections::BTreeMap;
use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::leibniz::{ITERATIONS, calculate_pi};
use crate::utils::errors::BenchError;

/// Percentiles reported for every benchmark.
pub const REPORTED_PERCENTILES: [u8; 4] = [50, 90, 95, 99];

/// Mean differences within this many percent count as unchanged.
pub const NOISE_THRESHOLD_PERCENT: f64 = 5.0;

/// Statistical summary of benchmark results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    /// Number of measured runs
    pub iterations: usize,
    pub mean: Duration,
    pub median: Duration,
    /// Population standard deviation
    pub std_dev: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Keyed by percentile (50, 90, 95, 99)
    pub percentiles: BTreeMap<u8, Duration>,
}

impl BenchmarkStats {
    /// Calculate statistics from a list of durations
    #[must_use]
    pub fn from_durations(mut durations: Vec<Duration>) -> Self {
        let (Some(&min), Some(&max)) = (durations.iter().min(), durations.iter().max()) else {
            return Self::default();
        };

        durations.sort_unstable();
        let iterations = durations.len();

        let total_nanos: u128 = durations.iter().map(Duration::as_nanos).sum();
        let mean_nanos = total_nanos / iterations as u128;
        let mean = nanos_to_duration(mean_nanos);

        let mid = iterations / 2;
        let median = if iterations % 2 == 0 {
            nanos_to_duration((durations[mid - 1].as_nanos() + durations[mid].as_nanos()) / 2)
        } else {
            durations[mid]
        };

        let variance = durations
            .iter()
            .map(|d| {
                let diff = d.as_nanos() as f64 - mean_nanos as f64;
                diff * diff
            })
            .sum::<f64>()
            / iterations as f64;
        let std_dev = Duration::from_nanos(variance.sqrt() as u64);

        let percentiles = REPORTED_PERCENTILES
            .iter()
            .map(|&p| (p, percentile(&durations, f64::from(p))))
            .collect();

        Self {
            iterations,
            mean,
            median,
            std_dev,
            min,
            max,
            percentiles,
        }
    }

    /// Look up a reported percentile, zero if the sample set was empty.
    pub fn percentile(&self, p: u8) -> Duration {
        self.percentiles.get(&p).copied().unwrap_or_default()
    }

    /// Format statistics as a human-readable string
    pub fn format(&self) -> String {
        format!(
            "Iterations: {}\n\
             Mean:       {:?}\n\
             Median:     {:?}\n\
             Std Dev:    {:?}\n\
             Min:        {:?}\n\
             Max:        {:?}\n\
             P50:        {:?}\n\
             P90:        {:?}\n\
             P95:        {:?}\n\
             P99:        {:?}",
            self.iterations,
            self.mean,
            self.median,
            self.std_dev,
            self.min,
            self.max,
            self.percentile(50),
            self.percentile(90),
            self.percentile(95),
            self.percentile(99),
        )
    }
}

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Runs executed before measuring
    pub warmup_iterations: usize,
    /// Number of measured runs
    pub iterations: usize,
    /// Keep measuring until at least this much time has passed
    pub min_duration: Option<Duration>,
    /// Stop measuring once this much time has passed
    pub max_duration: Option<Duration>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 10,
            iterations: 100,
            min_duration: None,
            max_duration: None,
        }
    }
}

/// Benchmark result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub stats: BenchmarkStats,
    /// Wall-clock time the run finished, in milliseconds since the epoch
    pub timestamp_ms: u64,
}

impl BenchmarkResult {
    pub fn to_json(&self) -> Result<String, BenchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One CSV row matching [`BenchmarkResult::csv_header`], durations in nanoseconds.
    pub fn to_csv_row(&self) -> String {
        let s = &self.stats;
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            self.name,
            s.iterations,
            s.mean.as_nanos(),
            s.median.as_nanos(),
            s.std_dev.as_nanos(),
            s.min.as_nanos(),
            s.max.as_nanos(),
            s.percentile(90).as_nanos(),
            s.percentile(95).as_nanos(),
            s.percentile(99).as_nanos(),
        )
    }

    pub fn csv_header() -> &'static str {
        "name,iterations,mean_ns,median_ns,std_dev_ns,min_ns,max_ns,p90_ns,p95_ns,p99_ns"
    }
}

/// Benchmark runner
#[derive(Debug, Clone)]
pub struct Benchmark {
    name: String,
    config: BenchmarkConfig,
}

impl Benchmark {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: BenchmarkConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: BenchmarkConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn warmup(mut self, iterations: usize) -> Self {
        self.config.warmup_iterations = iterations;
        self
    }

    #[must_use]
    pub const fn iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    pub const fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run the benchmark
    pub fn run<F>(self, mut f: F) -> BenchmarkResult
    where
        F: FnMut(),
    {
        debug!(
            name = %self.name,
            warmup = self.config.warmup_iterations,
            iterations = self.config.iterations,
            "benchmark started"
        );

        for _ in 0..self.config.warmup_iterations {
            f();
        }

        let mut durations = Vec::with_capacity(self.config.iterations);
        let start_time = Instant::now();

        for _ in 0..self.config.iterations {
            let iter_start = Instant::now();
            f();
            durations.push(iter_start.elapsed());

            if self
                .config
                .max_duration
                .is_some_and(|max_dur| start_time.elapsed() > max_dur)
            {
                debug!(name = %self.name, measured = durations.len(), "max duration reached");
                break;
            }
        }

        if let Some(min_dur) = self.config.min_duration {
            while start_time.elapsed() < min_dur {
                let iter_start = Instant::now();
                f();
                durations.push(iter_start.elapsed());
            }
        }

        let stats = BenchmarkStats::from_durations(durations);
        info!(name = %self.name, runs = stats.iterations, mean = ?stats.mean, "benchmark finished");

        BenchmarkResult {
            name: self.name,
            stats,
            timestamp_ms: current_time_ms(),
        }
    }
}

/// Measure the full-length series computation under `config`.
pub fn leibniz_benchmark(config: BenchmarkConfig) -> BenchmarkResult {
    Benchmark::new("leibniz_pi")
        .with_config(config)
        .run(|| {
            black_box(calculate_pi(black_box(ITERATIONS)));
        })
}

/// Compare two benchmark results
pub fn compare_benchmarks(
    baseline: &BenchmarkResult,
    current: &BenchmarkResult,
) -> Result<String, BenchError> {
    if baseline.stats.mean.is_zero() {
        return Err(BenchError::ZeroBaseline {
            name: baseline.name.clone(),
        });
    }

    let baseline_mean = baseline.stats.mean.as_nanos() as f64;
    let current_mean = current.stats.mean.as_nanos() as f64;
    let diff_percent = ((current_mean - baseline_mean) / baseline_mean) * 100.0;

    let status = if diff_percent.abs() < NOISE_THRESHOLD_PERCENT {
        "~"
    } else if diff_percent < 0.0 {
        "FASTER"
    } else {
        "SLOWER"
    };

    Ok(format!(
        "{} vs {}: {:.2}% {} (baseline: {:?}, current: {:?})",
        current.name,
        baseline.name,
        diff_percent.abs(),
        status,
        baseline.stats.mean,
        current.stats.mean
    ))
}

/// Nearest-rank percentile of already sorted durations
fn percentile(sorted_durations: &[Duration], p: f64) -> Duration {
    let Some(last) = sorted_durations.len().checked_sub(1) else {
        return Duration::ZERO;
    };

    let index = ((p / 100.0) * last as f64).round() as usize;
    sorted_durations[index.min(last)]
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_millis).collect()
    }

    fn result_with_mean(name: &str, mean: Duration) -> BenchmarkResult {
        BenchmarkResult {
            name: name.into(),
            stats: BenchmarkStats {
                iterations: 1,
                mean,
                median: mean,
                min: mean,
                max: mean,
                ..BenchmarkStats::default()
            },
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_benchmark_stats() {
        let stats = BenchmarkStats::from_durations(millis(&[10, 20, 15, 25, 18]));
        assert_eq!(stats.iterations, 5);
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(25));
        assert_eq!(stats.median, Duration::from_millis(18));
        assert_eq!(stats.mean, Duration::from_millis(17) + Duration::from_micros(600));
    }

    #[test]
    fn even_sample_median_averages_middle_pair() {
        let stats = BenchmarkStats::from_durations(millis(&[4, 1, 3, 2]));
        assert_eq!(stats.median, Duration::from_micros(2_500));
    }

    #[test]
    fn constant_samples_have_no_spread() {
        let stats = BenchmarkStats::from_durations(millis(&[7, 7, 7]));
        assert_eq!(stats.std_dev, Duration::ZERO);
        assert_eq!(stats.percentile(99), Duration::from_millis(7));
    }

    #[test]
    fn empty_samples_give_default_stats() {
        let stats = BenchmarkStats::from_durations(Vec::new());
        assert_eq!(stats, BenchmarkStats::default());
        assert_eq!(stats.percentile(90), Duration::ZERO);
        assert!(stats.format().starts_with("Iterations: 0"));
    }

    #[test]
    fn test_percentile() {
        let durations = millis(&[1, 2, 3, 4, 5]);
        assert_eq!(percentile(&durations, 50.0), Duration::from_millis(3));
        assert_eq!(percentile(&durations, 99.0), Duration::from_millis(5));
        assert_eq!(percentile(&[], 50.0), Duration::ZERO);
    }

    #[test]
    fn test_benchmark_run() {
        let mut calls = 0;
        let result = Benchmark::new("test")
            .warmup(2)
            .iterations(10)
            .run(|| {
                calls += 1;
                std::thread::sleep(Duration::from_micros(100));
            });

        assert_eq!(calls, 12);
        assert_eq!(result.name, "test");
        assert_eq!(result.stats.iterations, 10);
        assert!(result.stats.mean > Duration::ZERO);
    }

    #[test]
    fn max_duration_stops_early() {
        let config = BenchmarkConfig {
            warmup_iterations: 0,
            iterations: 1_000,
            min_duration: None,
            max_duration: Some(Duration::from_millis(5)),
        };
        let result = Benchmark::new("capped")
            .with_config(config)
            .run(|| std::thread::sleep(Duration::from_millis(2)));

        assert!(result.stats.iterations < 1_000);
        assert!(result.stats.iterations >= 1);
    }

    #[test]
    fn min_duration_extends_run() {
        let config = BenchmarkConfig {
            warmup_iterations: 0,
            iterations: 1,
            min_duration: Some(Duration::from_millis(10)),
            max_duration: None,
        };
        let result = Benchmark::new("extended")
            .with_config(config)
            .run(|| std::thread::sleep(Duration::from_millis(1)));

        assert!(result.stats.iterations > 1);
    }

    #[test]
    fn leibniz_benchmark_measures_requested_runs() {
        let result = leibniz_benchmark(BenchmarkConfig {
            warmup_iterations: 0,
            iterations: 1,
            min_duration: None,
            max_duration: None,
        });
        assert_eq!(result.name, "leibniz_pi");
        assert_eq!(result.stats.iterations, 1);
    }

    #[test]
    fn csv_row_matches_header_columns() {
        let result = Benchmark::new("csv").warmup(0).iterations(3).run(|| {});
        let header_cols = BenchmarkResult::csv_header().split(',').count();
        let row = result.to_csv_row();
        assert_eq!(row.split(',').count(), header_cols);
        assert!(row.starts_with("csv,3,"));
    }

    #[test]
    fn json_export_round_trips() {
        let result = Benchmark::new("json").warmup(0).iterations(3).run(|| {});
        let json = result.to_json().unwrap();
        let parsed: BenchmarkResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn comparison_classifies_changes() {
        let baseline = result_with_mean("base", Duration::from_millis(100));

        let same = compare_benchmarks(&baseline, &result_with_mean("same", Duration::from_millis(102)))
            .unwrap();
        assert!(same.contains("~"), "{same}");

        let faster =
            compare_benchmarks(&baseline, &result_with_mean("fast", Duration::from_millis(50)))
                .unwrap();
        assert!(faster.starts_with("fast vs base: 50.00% FASTER"), "{faster}");

        let slower =
            compare_benchmarks(&baseline, &result_with_mean("slow", Duration::from_millis(150)))
                .unwrap();
        assert!(slower.contains("SLOWER"), "{slower}");
    }

    #[test]
    fn zero_baseline_is_rejected() {
        let baseline = result_with_mean("empty", Duration::ZERO);
        let current = result_with_mean("current", Duration::from_millis(1));
        let err = compare_benchmarks(&baseline, &current).unwrap_err();
        assert!(matches!(err, BenchError::ZeroBaseline { ref name } if name == "empty"));
    }
}
