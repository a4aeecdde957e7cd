//! Filesystem capability surface consumed by the harness.
//!
//! Every benchmark phase talks to the filesystem only through [`FileSystem`],
//! so the same measurement code runs unchanged against any backend:
//!
//! - [`ThreadPoolFs`]: `tokio::fs`, each call dispatched to the blocking pool
//! - [`InlineFs`]: `std::fs` executed directly inside the future
//!
//! All methods are suspension points. Concurrency within a task is expressed by
//! joining several of these futures (see `bench::concurrent`).

mod inline;
mod thread_pool;

pub use inline::InlineFs;
pub use thread_pool::ThreadPoolFs;

use std::fs::Metadata;
use std::future::Future;
use std::io;
use std::path::Path;

/// Async filesystem primitives used by the benchmarks and the workspace manager.
pub trait FileSystem: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Create a single directory (parent must exist).
    fn create_dir(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    /// List entry names in a directory.
    fn list_dir(&self, path: &Path) -> impl Future<Output = io::Result<Vec<String>>> + Send;

    /// Create or truncate `path` and write `data`.
    fn write_bytes(&self, path: &Path, data: &[u8]) -> impl Future<Output = io::Result<()>> + Send;

    /// Read the full contents of `path`.
    fn read_bytes(&self, path: &Path) -> impl Future<Output = io::Result<Vec<u8>>> + Send;

    /// Create or truncate `path` and write UTF-8 `text`.
    fn write_text(&self, path: &Path, text: &str) -> impl Future<Output = io::Result<()>> + Send;

    /// Read `path` as UTF-8.
    fn read_text(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;

    /// Query metadata for `path`, following symlinks.
    fn stat(&self, path: &Path) -> impl Future<Output = io::Result<Metadata>> + Send;
}

/// Convert a directory entry name to an owned string, lossily.
fn entry_name(name: &std::ffi::OsStr) -> String {
    name.to_string_lossy().into_owned()
}
