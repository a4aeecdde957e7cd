//! Benchmark configuration types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Number of serial operations per single-operation benchmark.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Number of independent write→read→stat chains per concurrent batch.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Scratch directory, relative to the working directory.
pub const DEFAULT_WORKSPACE: &str = "fsbench_tmp";

/// A named payload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeBucket {
    /// Human-readable label (e.g. "64KB").
    pub label: &'static str,
    /// Payload length in bytes.
    pub bytes: usize,
}

impl SizeBucket {
    pub const fn new(label: &'static str, bytes: usize) -> Self {
        Self { label, bytes }
    }

    /// Look up a bucket from [`SIZE_BUCKETS`] by label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        SIZE_BUCKETS
            .iter()
            .copied()
            .find(|b| b.label.eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Payload sizes measured by every size-parameterized phase, in increasing order.
pub const SIZE_BUCKETS: &[SizeBucket] = &[
    SizeBucket::new("1KB", 1024),
    SizeBucket::new("4KB", 4 * 1024),
    SizeBucket::new("16KB", 16 * 1024),
    SizeBucket::new("64KB", 64 * 1024),
    SizeBucket::new("256KB", 256 * 1024),
    SizeBucket::new("1MB", 1024 * 1024),
    SizeBucket::new("4MB", 4 * 1024 * 1024),
];

/// Filesystem backend serving the benchmarked operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// `tokio::fs`: every call hops onto the blocking thread pool.
    ThreadPool,
    /// `std::fs` called directly inside the future (no dispatch).
    Inline,
}

impl Backend {
    /// All backends, in run order.
    pub const ALL: [Backend; 2] = [Backend::ThreadPool, Backend::Inline];

    /// Get the full backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::ThreadPool => "tokio blocking thread pool",
            Backend::Inline => "inline std::fs",
        }
    }

    /// Get a short name for display in tables.
    pub fn short_name(&self) -> &'static str {
        match self {
            Backend::ThreadPool => "thread-pool",
            Backend::Inline => "inline",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thread-pool" | "threadpool" | "pool" | "tokio" => Ok(Backend::ThreadPool),
            "inline" | "std" => Ok(Backend::Inline),
            _ => Err(format!(
                "Unknown backend: {s}. Valid options: thread-pool, inline, all"
            )),
        }
    }
}

/// Operation measured by a benchmark result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Write,
    Read,
    Stat,
    Concurrent,
    Scenario,
}

impl OperationType {
    pub fn label(&self) -> &'static str {
        match self {
            OperationType::Write => "Write",
            OperationType::Read => "Read",
            OperationType::Stat => "Stat",
            OperationType::Concurrent => "Concurrent",
            OperationType::Scenario => "Real-world",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full configuration for one harness run.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Scratch directory created before and removed after the run.
    pub workspace: PathBuf,
    /// Serial operations per single-operation benchmark.
    pub iterations: usize,
    /// Chains per concurrent batch.
    pub concurrency: usize,
    /// Size buckets to measure, in increasing order.
    pub sizes: Vec<SizeBucket>,
    /// Backends to run, in order.
    pub backends: Vec<Backend>,
    /// Colored console output.
    pub color: bool,
    /// Verbose logging.
    pub verbose: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from(DEFAULT_WORKSPACE),
            iterations: DEFAULT_ITERATIONS,
            concurrency: DEFAULT_CONCURRENCY,
            sizes: SIZE_BUCKETS.to_vec(),
            backends: vec![Backend::ThreadPool],
            color: false,
            verbose: false,
        }
    }
}

impl BenchmarkConfig {
    /// True when results from more than one backend will be compared.
    pub fn is_comparison(&self) -> bool {
        self.backends.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_buckets_strictly_increasing() {
        assert_eq!(SIZE_BUCKETS.first().map(|b| b.bytes), Some(1024));
        assert_eq!(SIZE_BUCKETS.last().map(|b| b.bytes), Some(4 * 1024 * 1024));
        for pair in SIZE_BUCKETS.windows(2) {
            assert!(pair[0].bytes < pair[1].bytes, "{} !< {}", pair[0], pair[1]);
            assert_ne!(pair[0].label, pair[1].label);
        }
    }

    #[test]
    fn test_size_bucket_lookup() {
        assert_eq!(SizeBucket::from_label("64kb"), Some(SizeBucket::new("64KB", 65536)));
        assert_eq!(SizeBucket::from_label("1MB").map(|b| b.bytes), Some(1 << 20));
        assert!(SizeBucket::from_label("3KB").is_none());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("thread-pool".parse::<Backend>().unwrap(), Backend::ThreadPool);
        assert_eq!("TOKIO".parse::<Backend>().unwrap(), Backend::ThreadPool);
        assert_eq!("inline".parse::<Backend>().unwrap(), Backend::Inline);
        assert_eq!("std".parse::<Backend>().unwrap(), Backend::Inline);
        assert!("uring".parse::<Backend>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.iterations, 100);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.sizes.len(), SIZE_BUCKETS.len());
        assert_eq!(config.backends, vec![Backend::ThreadPool]);
        assert!(!config.is_comparison());
    }
}
