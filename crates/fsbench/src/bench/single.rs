//! Single-operation benchmarks: serial write, read, and stat loops.
//!
//! Operations within a loop never overlap, so each mean isolates the cost of one
//! call. Paths are built before the clock starts.

use crate::bench::Timing;
use crate::config::SizeBucket;
use crate::fs::FileSystem;
use crate::workspace::{Workspace, READ_PREFIX, STAT_FILE, WRITE_PREFIX};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;

/// Content of the file queried by the stat benchmark.
const STAT_CONTENT: &[u8] = b"test";

fn scratch_paths(workspace: &Workspace, prefix: &str, count: usize) -> Vec<PathBuf> {
    (0..count).map(|i| workspace.scratch_file(prefix, i)).collect()
}

/// Write one zero-filled payload to `iterations` fresh files.
pub async fn bench_write<F: FileSystem>(
    fs: &F,
    workspace: &Workspace,
    size: SizeBucket,
    iterations: usize,
) -> Result<Timing> {
    let data = vec![0u8; size.bytes];
    let paths = scratch_paths(workspace, WRITE_PREFIX, iterations);

    let start = Instant::now();
    for path in &paths {
        fs.write_bytes(path, &data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    let elapsed = start.elapsed();

    tracing::debug!(
        "{}: wrote {} x {} in {:?}",
        fs.name(),
        iterations,
        size,
        elapsed,
    );
    Ok(Timing::new(elapsed, iterations))
}

/// Read back `iterations` files written during an untimed setup.
pub async fn bench_read<F: FileSystem>(
    fs: &F,
    workspace: &Workspace,
    size: SizeBucket,
    iterations: usize,
) -> Result<Timing> {
    let data = vec![0u8; size.bytes];
    let paths = scratch_paths(workspace, READ_PREFIX, iterations);

    // Setup (not timed)
    for path in &paths {
        fs.write_bytes(path, &data)
            .await
            .with_context(|| format!("Failed to create read fixture {}", path.display()))?;
    }
    drop(data);

    let start = Instant::now();
    for path in &paths {
        let content = fs
            .read_bytes(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        std::hint::black_box(&content);
    }
    let elapsed = start.elapsed();

    tracing::debug!(
        "{}: read {} x {} in {:?}",
        fs.name(),
        iterations,
        size,
        elapsed,
    );
    Ok(Timing::new(elapsed, iterations))
}

/// Query metadata of one small file `iterations` times.
pub async fn bench_stat<F: FileSystem>(
    fs: &F,
    workspace: &Workspace,
    iterations: usize,
) -> Result<Timing> {
    let path = workspace.file(STAT_FILE);

    // Setup (not timed)
    fs.write_bytes(&path, STAT_CONTENT)
        .await
        .with_context(|| format!("Failed to create stat fixture {}", path.display()))?;

    let start = Instant::now();
    for _ in 0..iterations {
        let metadata = fs
            .stat(&path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        std::hint::black_box(metadata);
    }
    let elapsed = start.elapsed();

    Ok(Timing::new(elapsed, iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{InlineFs, ThreadPoolFs};
    use tempfile::TempDir;

    const ONE_KB: SizeBucket = SizeBucket::new("1KB", 1024);

    fn entries_with_prefix(workspace: &Workspace, prefix: &str) -> Vec<String> {
        std::fs::read_dir(workspace.root())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(prefix))
            .collect()
    }

    #[tokio::test]
    async fn test_write_creates_exactly_iteration_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());

        let timing = bench_write(&ThreadPoolFs, &workspace, ONE_KB, 100)
            .await
            .unwrap();

        assert!(timing.mean_ms().is_finite());
        assert!(timing.mean_ms() >= 0.0);
        assert_eq!(timing.count, 100);

        let mut names = entries_with_prefix(&workspace, WRITE_PREFIX);
        names.sort();
        let mut expected: Vec<String> = (0..100).map(|i| format!("write_{i}.tmp")).collect();
        expected.sort();
        assert_eq!(names, expected);

        for i in 0..100 {
            let len = std::fs::metadata(workspace.scratch_file(WRITE_PREFIX, i)).unwrap().len();
            assert_eq!(len, 1024);
        }

        workspace.cleanup(&ThreadPoolFs).await;
        assert!(entries_with_prefix(&workspace, WRITE_PREFIX).is_empty());
    }

    #[tokio::test]
    async fn test_read_uses_its_own_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());

        let timing = bench_read(&InlineFs, &workspace, ONE_KB, 10).await.unwrap();

        assert!(timing.mean_ms() >= 0.0);
        assert_eq!(entries_with_prefix(&workspace, READ_PREFIX).len(), 10);
        assert!(entries_with_prefix(&workspace, WRITE_PREFIX).is_empty());

        workspace.cleanup(&InlineFs).await;
        assert!(entries_with_prefix(&workspace, READ_PREFIX).is_empty());
    }

    #[tokio::test]
    async fn test_stat_single_fixture() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());

        let timing = bench_stat(&ThreadPoolFs, &workspace, 25).await.unwrap();

        assert_eq!(timing.count, 25);
        assert_eq!(std::fs::metadata(workspace.file(STAT_FILE)).unwrap().len(), 4);

        workspace.cleanup(&ThreadPoolFs).await;
        assert!(!workspace.file(STAT_FILE).exists());
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path().join("missing"));

        let err = bench_write(&InlineFs, &workspace, ONE_KB, 3)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("write_0.tmp"), "{err:#}");
    }
}
