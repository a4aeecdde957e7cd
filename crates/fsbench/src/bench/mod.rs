//! Benchmark phases and execution.
//!
//! Each phase is a strict setup → measure sequence returning a [`Timing`]; the
//! [`BenchmarkRunner`] reports it and runs workspace cleanup between buckets.

mod concurrent;
mod runner;
mod scenario;
mod single;

pub use concurrent::bench_concurrent;
pub use runner::BenchmarkRunner;
pub use scenario::{bench_scenario, ScenarioDocument};
pub use single::{bench_read, bench_stat, bench_write};

use crate::config::{Backend, OperationType, SizeBucket};
use std::time::Duration;

/// Progress update for a multi-step benchmark phase.
#[derive(Debug, Clone)]
pub struct PhaseProgress {
    /// Name of the current step (e.g., "Read")
    pub phase_name: &'static str,
    /// Current step index (0-based)
    pub phase_index: usize,
    /// Total number of steps
    pub total_phases: usize,
}

/// Elapsed wall-clock time for a measured loop or batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Total elapsed time from first to last operation.
    pub elapsed: Duration,
    /// Divisor for the per-operation average (iterations or chains).
    pub count: usize,
}

impl Timing {
    pub fn new(elapsed: Duration, count: usize) -> Self {
        Self { elapsed, count }
    }

    /// Raw elapsed time in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Elapsed time divided by `count`, in milliseconds.
    pub fn mean_ms(&self) -> f64 {
        self.total_ms() / self.count.max(1) as f64
    }
}

/// Result of a single benchmark.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Operation type.
    pub operation: OperationType,
    /// Backend that served the operations.
    pub backend: Backend,
    /// Payload size (absent for the scenario).
    pub size: Option<SizeBucket>,
    /// Measured time.
    pub timing: Timing,
}

impl BenchmarkResult {
    pub fn new(
        operation: OperationType,
        backend: Backend,
        size: Option<SizeBucket>,
        timing: Timing,
    ) -> Self {
        Self {
            operation,
            backend,
            size,
            timing,
        }
    }

    /// Display label, e.g. "Write 64KB".
    pub fn label(&self) -> String {
        match self.size {
            Some(size) => format!("{} {}", self.operation, size),
            None => self.operation.to_string(),
        }
    }

    /// Whether `other` measured the same thing (possibly on another backend).
    pub fn same_benchmark(&self, other: &BenchmarkResult) -> bool {
        self.operation == other.operation && self.size == other.size
    }
}
