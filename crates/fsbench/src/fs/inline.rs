//! `std::fs` backend: operations block the polling task with no dispatch.
//!
//! Useful as a floor for the per-call cost of the thread-pool hop. Joined
//! futures on this backend complete one after another.

use super::{entry_name, FileSystem};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

/// Filesystem served synchronously by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFs;

impl FileSystem for InlineFs {
    fn name(&self) -> &'static str {
        "inline"
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| entry_name(&e.file_name())))
            .collect()
    }

    async fn write_bytes(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }

    async fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    async fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }

    async fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        fs::metadata(path)
    }
}
