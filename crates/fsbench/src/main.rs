//! fsbench - async filesystem latency harness.

// Use mimalloc for reduced allocation latency (enabled by default).
// Disable with `--no-default-features` if debugging allocator issues.
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use fsbench::{
    bench::BenchmarkRunner,
    cli::Cli,
    config::{Backend, BenchmarkConfig},
    platform::EnvironmentReport,
    results::BenchmarkPrinter,
};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let config = Cli::parse()
        .into_config()
        .context("Invalid benchmark configuration")?;

    // Log lines go through indicatif so they appear above progress bars.
    // Respect RUST_LOG if set, otherwise use default based on verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });

    // The filter applies to log output only; bucket progress spans must still
    // reach the indicatif layer.
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .init();

    print_banner(&config);

    let printer = BenchmarkPrinter::new(config.color);
    printer.print_environment(&EnvironmentReport::probe());

    let runner = BenchmarkRunner::new(config);
    let results = runner.run().context("Benchmark execution failed")?;
    tracing::info!("Completed {} measurements", results.len());

    printer.print_section("Benchmark Complete");

    Ok(())
}

/// Print a compact one-line banner with configuration summary.
fn print_banner(config: &BenchmarkConfig) {
    use owo_colors::OwoColorize;

    let backends = config
        .backends
        .iter()
        .map(Backend::short_name)
        .collect::<Vec<_>>()
        .join(" vs ");

    println!();
    if config.color {
        println!(
            "{}: {} ({} sizes, {} iterations, {} concurrent) in {}",
            "fsbench".cyan().bold(),
            backends,
            config.sizes.len(),
            config.iterations,
            config.concurrency,
            config.workspace.display()
        );
    } else {
        println!(
            "fsbench: {} ({} sizes, {} iterations, {} concurrent) in {}",
            backends,
            config.sizes.len(),
            config.iterations,
            config.concurrency,
            config.workspace.display()
        );
    }
    println!();
}
