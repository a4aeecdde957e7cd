//! Console output for benchmark results.

use crate::bench::BenchmarkResult;
use crate::config::{Backend, OperationType, SizeBucket};
use crate::platform::EnvironmentReport;
use crate::results::format::{format_ms, format_percentage, format_speedup, speedup_indicator};
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 64;

/// Formats and prints benchmark results.
pub struct BenchmarkPrinter {
    /// Whether color output is enabled.
    color: bool,
}

impl BenchmarkPrinter {
    /// Create a new printer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print the environment probe.
    ///
    /// ```text
    /// System Information:
    ///   Version: fsbench 0.1.0
    ///   OS: linux
    ///   Arch: x86_64
    ///   CPUs: 8
    ///   Kernel: 6.1.0-18-amd64 (io_uring capable)
    /// ```
    pub fn print_environment(&self, report: &EnvironmentReport) {
        if self.color {
            println!("{}", "System Information:".bold());
        } else {
            println!("System Information:");
        }
        println!("  Version: fsbench {}", report.version);
        println!("  OS: {}", report.os);
        println!("  Arch: {}", report.arch);
        println!("  CPUs: {}", report.cpus);
        println!("  Kernel: {} ({})", report.kernel_label(), report.io_uring.label());
        println!();
    }

    /// Print a section header between ruled lines.
    pub fn print_section(&self, title: &str) {
        let rule = "═".repeat(RULE_WIDTH);
        if self.color {
            println!("{}", rule.dimmed());
            println!("  {}", title.bold());
            println!("{}", rule.dimmed());
        } else {
            println!("{rule}");
            println!("  {title}");
            println!("{rule}");
        }
        println!();
    }

    /// Print the header for one size bucket, e.g. `Testing 64KB files (100 iterations) [inline]:`.
    pub fn print_bucket_header(&self, size: SizeBucket, detail: &str, backend: Backend) {
        if self.color {
            println!("Testing {} files ({}) [{}]:", size.bold(), detail, backend.cyan());
        } else {
            println!("Testing {size} files ({detail}) [{backend}]:");
        }
    }

    /// Print a single result line.
    ///
    /// ```text
    ///   Write:      0.05 ms avg
    ///   Concurrent: 1.84 ms total | 0.18 ms per op
    ///   Real-world: 0.92 ms total
    /// ```
    pub fn print_result(&self, result: &BenchmarkResult) {
        let label = format!("{}:", result.operation);
        let value = match result.operation {
            OperationType::Write | OperationType::Read | OperationType::Stat => {
                format!("{} avg", format_ms(result.timing.mean_ms()))
            }
            OperationType::Concurrent => format!(
                "{} total | {} per op",
                format_ms(result.timing.total_ms()),
                format_ms(result.timing.mean_ms())
            ),
            OperationType::Scenario => format!("{} total", format_ms(result.timing.total_ms())),
        };

        if self.color {
            println!("  {:<12}{}", label.bold(), value.cyan());
        } else {
            println!("  {label:<12}{value}");
        }
    }

    /// Print the backend comparison.
    ///
    /// The first backend in `backends` is the baseline; every other backend is
    /// compared against it for each benchmark both of them ran. Prints nothing
    /// when fewer than two backends produced results.
    ///
    /// ```text
    /// Write 1KB    thread-pool:   0.05 ms | inline:   0.01 ms |  5.00x  +80.0% faster
    /// ```
    pub fn print_summary(&self, results: &[BenchmarkResult], backends: &[Backend]) {
        let Some((&baseline, others)) = backends.split_first() else {
            return;
        };
        if others.is_empty() {
            return;
        }

        let rows: Vec<_> = results
            .iter()
            .filter(|r| r.backend == baseline)
            .flat_map(|base| {
                results
                    .iter()
                    .filter(move |r| r.backend != baseline && r.same_benchmark(base))
                    .map(move |candidate| (base, candidate))
            })
            .collect();
        if rows.is_empty() {
            return;
        }

        println!();
        self.print_section("Summary");

        for (base, candidate) in rows {
            let base_ms = comparison_ms(base);
            let candidate_ms = comparison_ms(candidate);
            let speedup = base_ms / candidate_ms;
            let diff_percent = (base_ms - candidate_ms) / base_ms * 100.0;

            // Sub-resolution timings make the ratio meaningless
            if !speedup.is_finite() || !diff_percent.is_finite() {
                continue;
            }

            let line = format!(
                "{:<14} {}: {:>10} | {}: {:>10} | {:>7} {:>7} {}",
                base.label(),
                base.backend,
                format_ms(base_ms),
                candidate.backend,
                format_ms(candidate_ms),
                format_speedup(speedup),
                format_percentage(diff_percent),
                speedup_indicator(speedup)
            );
            if self.color {
                if speedup > 1.0 {
                    println!("  {}", line.green());
                } else {
                    println!("  {}", line.yellow());
                }
            } else {
                println!("  {line}");
            }
        }
        println!();
    }
}

/// The number a comparison uses: per-op mean for serial loops, batch total otherwise.
fn comparison_ms(result: &BenchmarkResult) -> f64 {
    match result.operation {
        OperationType::Write | OperationType::Read | OperationType::Stat => result.timing.mean_ms(),
        OperationType::Concurrent | OperationType::Scenario => result.timing.total_ms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::Timing;
    use std::time::Duration;

    fn make_result(operation: OperationType, backend: Backend, total_ms: u64) -> BenchmarkResult {
        let size =
            (operation != OperationType::Scenario).then_some(SizeBucket::new("1KB", 1024));
        BenchmarkResult::new(
            operation,
            backend,
            size,
            Timing::new(Duration::from_millis(total_ms), 10),
        )
    }

    #[test]
    fn test_print_result_no_panic() {
        let printer = BenchmarkPrinter::new(false);
        printer.print_result(&make_result(OperationType::Write, Backend::ThreadPool, 5));
        printer.print_result(&make_result(OperationType::Concurrent, Backend::ThreadPool, 5));
        printer.print_result(&make_result(OperationType::Scenario, Backend::ThreadPool, 5));
    }

    #[test]
    fn test_print_summary_single_backend() {
        let printer = BenchmarkPrinter::new(false);
        let results = vec![make_result(OperationType::Read, Backend::ThreadPool, 5)];
        printer.print_summary(&results, &[Backend::ThreadPool]);
        printer.print_summary(&results, &[]);
    }

    #[test]
    fn test_print_summary_multiple_backends() {
        let printer = BenchmarkPrinter::new(true);
        let results = vec![
            make_result(OperationType::Read, Backend::ThreadPool, 10),
            make_result(OperationType::Scenario, Backend::ThreadPool, 4),
            make_result(OperationType::Read, Backend::Inline, 5),
            make_result(OperationType::Scenario, Backend::Inline, 0),
        ];
        printer.print_summary(&results, &Backend::ALL);
    }

    #[test]
    fn test_comparison_ms_uses_mean_for_serial_ops() {
        let read = make_result(OperationType::Read, Backend::Inline, 100);
        let batch = make_result(OperationType::Concurrent, Backend::Inline, 100);
        assert!((comparison_ms(&read) - 10.0).abs() < 1e-9);
        assert!((comparison_ms(&batch) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_print_environment_no_panic() {
        let printer = BenchmarkPrinter::new(false);
        printer.print_environment(&EnvironmentReport::probe());
        printer.print_section("Single File Operations");
        printer.print_bucket_header(
            SizeBucket::new("4MB", 4 << 20),
            "100 iterations",
            Backend::Inline,
        );
    }
}
