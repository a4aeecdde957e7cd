//! `tokio::fs` backend: every operation runs on tokio's blocking thread pool.

use super::{entry_name, FileSystem};
use std::fs::Metadata;
use std::io;
use std::path::Path;

/// Filesystem served by `tokio::fs` (`spawn_blocking` per call).
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPoolFs;

impl FileSystem for ThreadPoolFs {
    fn name(&self) -> &'static str {
        "thread-pool"
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_dir(path).await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry_name(&entry.file_name()));
        }
        Ok(names)
    }

    async fn write_bytes(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, data).await
    }

    async fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        tokio::fs::write(path, text).await
    }

    async fn read_text(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        tokio::fs::metadata(path).await
    }
}
