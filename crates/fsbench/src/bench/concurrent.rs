//! Concurrent-operation benchmark.
//!
//! Launches a fixed batch of independent write → read → stat chains, each on its
//! own file, and measures wall-clock time until every chain has finished. The
//! chains are joined in the calling task; the backend decides how much of the
//! underlying I/O actually overlaps.

use crate::bench::Timing;
use crate::config::SizeBucket;
use crate::fs::FileSystem;
use crate::workspace::{Workspace, CONCURRENT_PREFIX};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::path::Path;
use std::time::Instant;

/// One chain: write the payload, read it back, stat it.
async fn run_chain<F: FileSystem>(fs: &F, path: &Path, data: &[u8]) -> Result<()> {
    fs.write_bytes(path, data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let content = fs
        .read_bytes(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.len() != data.len() {
        anyhow::bail!(
            "Read {} bytes from {}, expected {}",
            content.len(),
            path.display(),
            data.len()
        );
    }

    let metadata = fs
        .stat(path)
        .await
        .with_context(|| format!("Failed to stat {}", path.display()))?;
    std::hint::black_box(metadata);

    Ok(())
}

/// Run `concurrency` chains at once and time the whole batch.
///
/// The returned [`Timing`] has `count == concurrency`, so `total_ms()` is the
/// batch time and `mean_ms()` the per-chain average. The first failing chain
/// fails the batch.
pub async fn bench_concurrent<F: FileSystem>(
    fs: &F,
    workspace: &Workspace,
    size: SizeBucket,
    concurrency: usize,
) -> Result<Timing> {
    let data = vec![0u8; size.bytes];
    let paths: Vec<_> = (0..concurrency)
        .map(|i| workspace.scratch_file(CONCURRENT_PREFIX, i))
        .collect();

    let start = Instant::now();
    try_join_all(paths.iter().map(|path| run_chain(fs, path, &data))).await?;
    let elapsed = start.elapsed();

    tracing::debug!(
        "{}: {} concurrent chains of {} in {:?}",
        fs.name(),
        concurrency,
        size,
        elapsed
    );
    Ok(Timing::new(elapsed, concurrency))
}
