//! Benchmark execution runner.

use crate::bench::{
    bench_concurrent, bench_read, bench_scenario, bench_stat, bench_write, BenchmarkResult,
    PhaseProgress, ScenarioDocument, Timing,
};
use crate::config::{Backend, BenchmarkConfig, OperationType, SizeBucket};
use crate::fs::{FileSystem, InlineFs, ThreadPoolFs};
use crate::results::{BenchmarkPrinter, PhaseProgressReporter};
use crate::workspace::Workspace;
use anyhow::{Context, Result};

/// Steps measured for every bucket of the single-operation phase.
const SINGLE_STEPS: [&str; 3] = ["Write", "Read", "Stat"];

/// Runs the benchmark matrix for every configured backend.
///
/// Per backend the sequence is fixed: create the workspace, run single
/// operations per bucket, concurrent batches per bucket, the real-world
/// scenario, then remove the workspace. The workspace is emptied after every
/// bucket so directory size never carries over between measurements. Backends
/// run one after another, never interleaved.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    printer: BenchmarkPrinter,
}

impl BenchmarkRunner {
    /// Create a new benchmark runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        let printer = BenchmarkPrinter::new(config.color);
        Self { config, printer }
    }

    /// Run all phases on a current-thread tokio runtime.
    ///
    /// Results are printed as they are measured and returned in run order.
    /// The first failed operation aborts the run.
    pub fn run(&self) -> Result<Vec<BenchmarkResult>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;

        runtime.block_on(self.run_async())
    }

    /// Run all phases on the caller's runtime.
    pub async fn run_async(&self) -> Result<Vec<BenchmarkResult>> {
        let documents = ScenarioDocument::fixtures()?;
        let mut results = Vec::new();

        tracing::info!(
            "Running {} size buckets across {} backends ({} iterations, {} concurrent)",
            self.config.sizes.len(),
            self.config.backends.len(),
            self.config.iterations,
            self.config.concurrency
        );

        for &backend in &self.config.backends {
            match backend {
                Backend::ThreadPool => {
                    self.run_backend(&ThreadPoolFs, backend, &documents, &mut results)
                        .await?;
                }
                Backend::Inline => {
                    self.run_backend(&InlineFs, backend, &documents, &mut results)
                        .await?;
                }
            }
        }

        if self.config.is_comparison() {
            self.printer.print_summary(&results, &self.config.backends);
        }

        Ok(results)
    }

    /// Run every phase on one backend, tearing the workspace down even on failure.
    async fn run_backend<F: FileSystem>(
        &self,
        fs: &F,
        backend: Backend,
        documents: &[ScenarioDocument],
        results: &mut Vec<BenchmarkResult>,
    ) -> Result<()> {
        let workspace = Workspace::new(&self.config.workspace);
        tracing::debug!("Preparing {} for {}", workspace.root().display(), fs.name());
        workspace.ensure(fs).await;

        let outcome = self
            .run_phases(fs, backend, &workspace, documents, results)
            .await;

        workspace.teardown(fs).await;
        outcome.with_context(|| format!("Benchmark failed on {} backend", backend.name()))
    }

    async fn run_phases<F: FileSystem>(
        &self,
        fs: &F,
        backend: Backend,
        workspace: &Workspace,
        documents: &[ScenarioDocument],
        results: &mut Vec<BenchmarkResult>,
    ) -> Result<()> {
        let iterations = self.config.iterations;
        let concurrency = self.config.concurrency;

        self.printer.print_section(&format!("Single File Operations [{backend}]"));
        for &size in &self.config.sizes {
            self.printer
                .print_bucket_header(size, &format!("{iterations} iterations"), backend);

            let reporter = self.reporter(backend, size, SINGLE_STEPS.len());
            reporter.update(&step(0));
            let write = bench_write(fs, workspace, size, iterations).await?;
            reporter.update(&step(1));
            let read = bench_read(fs, workspace, size, iterations).await?;
            reporter.update(&step(2));
            let stat = bench_stat(fs, workspace, iterations).await?;
            let wall = reporter.finish();
            tracing::debug!(
                "{} / {}: single-operation steps took {:?}",
                backend,
                size,
                wall,
            );

            workspace.cleanup(fs).await;

            self.record(results, OperationType::Write, backend, Some(size), write);
            self.record(results, OperationType::Read, backend, Some(size), read);
            self.record(results, OperationType::Stat, backend, Some(size), stat);
            println!();
        }

        self.printer.print_section(&format!(
            "Concurrent File Operations ({concurrency} concurrent) [{backend}]"
        ));
        for &size in &self.config.sizes {
            self.printer
                .print_bucket_header(size, &format!("{concurrency} concurrent"), backend);

            let reporter = self.reporter(backend, size, 1);
            reporter.update(&PhaseProgress {
                phase_name: "Concurrent",
                phase_index: 0,
                total_phases: 1,
            });
            let batch = bench_concurrent(fs, workspace, size, concurrency).await?;
            let wall = reporter.finish();
            tracing::debug!(
                "{} / {}: concurrent batch took {:?}",
                backend,
                size,
                wall,
            );

            workspace.cleanup(fs).await;

            self.record(results, OperationType::Concurrent, backend, Some(size), batch);
            println!();
        }

        self.printer.print_section(&format!("Real-world Scenario [{backend}]"));
        let scenario = bench_scenario(fs, workspace, documents).await?;
        workspace.cleanup(fs).await;
        self.record(results, OperationType::Scenario, backend, None, scenario);
        println!();

        Ok(())
    }

    fn reporter(&self, backend: Backend, size: SizeBucket, steps: usize) -> PhaseProgressReporter {
        PhaseProgressReporter::new(&format!("{backend} / {size}"), steps, self.config.color)
    }

    fn record(
        &self,
        results: &mut Vec<BenchmarkResult>,
        operation: OperationType,
        backend: Backend,
        size: Option<SizeBucket>,
        timing: Timing,
    ) {
        let result = BenchmarkResult::new(operation, backend, size, timing);
        self.printer.print_result(&result);
        results.push(result);
    }
}

fn step(index: usize) -> PhaseProgress {
    PhaseProgress {
        phase_name: SINGLE_STEPS[index],
        phase_index: index,
        total_phases: SINGLE_STEPS.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::Metadata;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Files each phase writes first: the single-operation loop, the concurrent
    /// batch, and the scenario.
    const FIRST_FILES: [&str; 3] = ["write_0.tmp", "concurrent_0.tmp", "config.json"];

    /// Inline backend that records how many entries the workspace holds
    /// whenever a phase writes its first file.
    #[derive(Default)]
    struct EntryCountingFs {
        inner: InlineFs,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl EntryCountingFs {
        fn observe(&self, path: &Path) {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return;
            };
            if !FIRST_FILES.contains(&name) {
                return;
            }
            let entries = path
                .parent()
                .and_then(|dir| std::fs::read_dir(dir).ok())
                .map_or(0, Iterator::count);
            self.seen.lock().unwrap().push((name.to_string(), entries));
        }

        fn seen(&self) -> Vec<(String, usize)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl FileSystem for EntryCountingFs {
        fn name(&self) -> &'static str {
            "entry-counting"
        }

        async fn create_dir(&self, path: &Path) -> io::Result<()> {
            self.inner.create_dir(path).await
        }

        async fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.inner.remove_file(path).await
        }

        async fn remove_dir(&self, path: &Path) -> io::Result<()> {
            self.inner.remove_dir(path).await
        }

        async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
            self.inner.list_dir(path).await
        }

        async fn write_bytes(&self, path: &Path, data: &[u8]) -> io::Result<()> {
            self.observe(path);
            self.inner.write_bytes(path, data).await
        }

        async fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.inner.read_bytes(path).await
        }

        async fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
            self.observe(path);
            self.inner.write_text(path, text).await
        }

        async fn read_text(&self, path: &Path) -> io::Result<String> {
            self.inner.read_text(path).await
        }

        async fn stat(&self, path: &Path) -> io::Result<Metadata> {
            self.inner.stat(path).await
        }
    }

    fn small_config(workspace: std::path::PathBuf, backends: Vec<Backend>) -> BenchmarkConfig {
        BenchmarkConfig {
            workspace,
            iterations: 5,
            concurrency: 3,
            sizes: vec![SizeBucket::new("1KB", 1024), SizeBucket::new("4KB", 4096)],
            backends,
            color: false,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_run_async_result_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = small_config(temp_dir.path().join("bench"), vec![Backend::Inline]);
        let runner = BenchmarkRunner::new(config);

        let results = runner.run_async().await.unwrap();

        let ops: Vec<OperationType> = results.iter().map(|r| r.operation).collect();
        assert_eq!(
            ops,
            vec![
                OperationType::Write,
                OperationType::Read,
                OperationType::Stat,
                OperationType::Write,
                OperationType::Read,
                OperationType::Stat,
                OperationType::Concurrent,
                OperationType::Concurrent,
                OperationType::Scenario,
            ]
        );
        assert!(results.iter().all(|r| r.timing.mean_ms() >= 0.0));
        assert!(!temp_dir.path().join("bench").exists());
    }

    #[tokio::test]
    async fn test_workspace_empty_when_each_bucket_starts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = small_config(temp_dir.path().join("bench"), vec![Backend::Inline]);
        let runner = BenchmarkRunner::new(config);
        let documents = ScenarioDocument::fixtures().unwrap();
        let fs = EntryCountingFs::default();
        let mut results = Vec::new();

        runner
            .run_backend(&fs, Backend::Inline, &documents, &mut results)
            .await
            .unwrap();

        let expected: Vec<(String, usize)> = [
            "write_0.tmp",
            "write_0.tmp",
            "concurrent_0.tmp",
            "concurrent_0.tmp",
            "config.json",
        ]
        .iter()
        .map(|name| ((*name).to_string(), 0))
        .collect();
        assert_eq!(fs.seen(), expected);
        assert_eq!(results.len(), 9);
        assert!(!temp_dir.path().join("bench").exists());
    }

    #[tokio::test]
    async fn test_failure_still_tears_down() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // Workspace parent does not exist, so creation is skipped and the first write fails
        let config = small_config(temp_dir.path().join("a/b"), vec![Backend::ThreadPool]);
        let runner = BenchmarkRunner::new(config);

        let err = runner.run_async().await.unwrap_err();
        assert!(format!("{err:#}").contains("write_0.tmp"), "{err:#}");
        assert!(!temp_dir.path().join("a").exists());
    }
}
