//! Command-line interface for the benchmark harness.

use crate::config::{
    Backend, BenchmarkConfig, SizeBucket, DEFAULT_CONCURRENCY, DEFAULT_ITERATIONS,
    DEFAULT_WORKSPACE, SIZE_BUCKETS,
};
use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

/// Latency harness for async filesystem operations.
///
/// Measures serial write/read/stat latency and concurrent write→read→stat
/// batches across payload sizes from 1KB to 4MB, plus a small JSON
/// config-loading scenario. Run it once per build to compare I/O backends.
#[derive(Parser, Debug)]
#[command(name = "fsbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Scratch directory for generated files (removed at the end).
    #[arg(short = 'd', long = "dir", value_name = "PATH", default_value = DEFAULT_WORKSPACE)]
    pub dir: PathBuf,

    /// Serial operations per single-operation benchmark.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Chains per concurrent batch.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Backends to benchmark.
    ///
    /// Valid values: thread-pool (tokio::fs), inline (std::fs), all.
    /// Defaults to thread-pool. With more than one, a comparison is printed.
    #[arg(short = 'b', long = "backend", value_name = "NAME")]
    pub backends: Vec<String>,

    /// Restrict to specific payload sizes.
    ///
    /// Valid values: 1KB, 4KB, 16KB, 64KB, 256KB, 1MB, 4MB.
    /// Can be specified multiple times. Defaults to all.
    #[arg(short = 's', long = "size", value_name = "LABEL")]
    pub sizes: Vec<String>,

    /// Disable colored output.
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Force colored output (even when not a TTY).
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Verbose output.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Build and validate the run configuration.
    pub fn into_config(self) -> Result<BenchmarkConfig> {
        if self.iterations == 0 {
            bail!("Iterations must be at least 1");
        }
        if self.concurrency == 0 {
            bail!("Concurrency must be at least 1");
        }

        let backends = self.parse_backends()?;
        let sizes = self.parse_sizes()?;

        // --color forces it on, --no-color forces it off
        let color = self.color || (!self.no_color && supports_color());

        Ok(BenchmarkConfig {
            workspace: self.dir,
            iterations: self.iterations,
            concurrency: self.concurrency,
            sizes,
            backends,
            color,
            verbose: self.verbose,
        })
    }

    /// Parse backend names, keeping the given order and dropping duplicates.
    fn parse_backends(&self) -> Result<Vec<Backend>> {
        if self.backends.is_empty() {
            return Ok(vec![Backend::ThreadPool]);
        }

        let mut backends = Vec::new();
        for name in &self.backends {
            let selected: Vec<Backend> = if name.eq_ignore_ascii_case("all") {
                Backend::ALL.to_vec()
            } else {
                vec![name.parse().map_err(|e: String| anyhow::anyhow!(e))?]
            };
            for backend in selected {
                if !backends.contains(&backend) {
                    backends.push(backend);
                }
            }
        }

        Ok(backends)
    }

    /// Resolve size labels, keeping the canonical increasing order.
    fn parse_sizes(&self) -> Result<Vec<SizeBucket>> {
        if self.sizes.is_empty() {
            return Ok(SIZE_BUCKETS.to_vec());
        }

        let unknown: Vec<&str> = self
            .sizes
            .iter()
            .filter(|label| SizeBucket::from_label(label.as_str()).is_none())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            let valid: Vec<&str> = SIZE_BUCKETS.iter().map(|b| b.label).collect();
            bail!(
                "Unknown size(s): {}. Valid options: {}",
                unknown.join(", "),
                valid.join(", ")
            );
        }

        Ok(SIZE_BUCKETS
            .iter()
            .copied()
            .filter(|bucket| {
                self.sizes
                    .iter()
                    .any(|label| bucket.label.eq_ignore_ascii_case(label))
            })
            .collect())
    }
}

/// Check if the terminal supports colors.
fn supports_color() -> bool {
    // Check NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    // Check FORCE_COLOR environment variable (common convention)
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    // Check if stdout is a TTY
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(std::io::stdout().as_raw_fd()) != 0 }
    }

    #[cfg(not(unix))]
    {
        true
    }
}
