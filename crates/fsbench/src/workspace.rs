//! Scratch directory lifecycle.
//!
//! Housekeeping is best-effort: creation and removal never abort a run. Errors
//! whose kind is in the ignorable set are dropped silently, anything else is
//! logged and skipped.

use crate::fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix shared by every generated scratch file.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Fixed file names written by the real-world scenario.
pub const SCENARIO_FILES: [&str; 4] = [
    "config.json",
    "settings.json",
    "data.json",
    "cache.json",
];

/// Scratch file name prefixes, one per phase.
pub const WRITE_PREFIX: &str = "write_";
pub const READ_PREFIX: &str = "read_";
pub const CONCURRENT_PREFIX: &str = "concurrent_";
pub const STAT_FILE: &str = "stat.tmp";

/// Error kinds that housekeeping treats as success.
const IGNORABLE_KINDS: [io::ErrorKind; 2] =
    [io::ErrorKind::NotFound, io::ErrorKind::AlreadyExists];

/// Whether a housekeeping error can be dropped without logging.
pub fn is_ignorable(err: &io::Error) -> bool {
    IGNORABLE_KINDS.contains(&err.kind())
}

/// The scratch directory all phases write into.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the `index`-th scratch file for a phase prefix, e.g. `write_3.tmp`.
    pub fn scratch_file(&self, prefix: &str, index: usize) -> PathBuf {
        self.root.join(format!("{prefix}{index}{TEMP_SUFFIX}"))
    }

    /// Path of a fixed-name file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the directory. An existing directory is not an error.
    pub async fn ensure<F: FileSystem>(&self, fs: &F) {
        match fs.create_dir(&self.root).await {
            Ok(()) => tracing::debug!("Created workspace {}", self.root.display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!("Workspace {} already exists", self.root.display());
            }
            Err(e) => {
                tracing::warn!("Failed to create workspace {}: {}", self.root.display(), e);
            }
        }
    }

    /// Remove every scratch file and scenario file, leaving the directory empty.
    ///
    /// Returns the number of entries removed. A missing directory counts as clean.
    pub async fn cleanup<F: FileSystem>(&self, fs: &F) -> usize {
        let mut removed = 0;

        match fs.list_dir(&self.root).await {
            Ok(names) => {
                for name in names.iter().filter(|n| n.ends_with(TEMP_SUFFIX)) {
                    if remove_best_effort(fs, &self.root.join(name)).await {
                        removed += 1;
                    }
                }
            }
            Err(e) if is_ignorable(&e) => {}
            Err(e) => {
                tracing::warn!("Failed to list workspace {}: {}", self.root.display(), e);
            }
        }

        for name in SCENARIO_FILES {
            if remove_best_effort(fs, &self.file(name)).await {
                removed += 1;
            }
        }

        tracing::debug!("Cleanup removed {} entries from {}", removed, self.root.display());
        removed
    }

    /// Final cleanup followed by removal of the directory itself.
    pub async fn teardown<F: FileSystem>(&self, fs: &F) {
        self.cleanup(fs).await;
        match fs.remove_dir(&self.root).await {
            Ok(()) => tracing::debug!("Removed workspace {}", self.root.display()),
            Err(e) if is_ignorable(&e) => {}
            Err(e) => {
                tracing::warn!("Failed to remove workspace {}: {}", self.root.display(), e);
            }
        }
    }
}

/// Remove a file, reporting whether it existed.
async fn remove_best_effort<F: FileSystem>(fs: &F, path: &Path) -> bool {
    match fs.remove_file(path).await {
        Ok(()) => true,
        Err(e) if is_ignorable(&e) => false,
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
            false
        }
    }
}
