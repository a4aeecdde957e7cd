//! Environment probe: platform identifiers and the kernel I/O ring capability hint.

use std::fmt;

/// Minimum Linux kernel version with a usable io_uring interface.
pub const MIN_IO_URING_KERNEL: KernelVersion = KernelVersion { major: 5, minor: 6 };

/// Source of the running kernel's release string on Linux.
#[cfg(target_os = "linux")]
const OSRELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// `major.minor` of a kernel release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KernelVersion {
    pub major: u32,
    pub minor: u32,
}

impl KernelVersion {
    /// Whether this kernel can serve filesystem operations through io_uring.
    pub fn supports_io_uring(&self) -> bool {
        self.major > MIN_IO_URING_KERNEL.major
            || (self.major == MIN_IO_URING_KERNEL.major && self.minor >= MIN_IO_URING_KERNEL.minor)
    }
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Errors from parsing a kernel release string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelVersionError {
    /// Release string was empty or whitespace.
    #[error("empty kernel release string")]
    Empty,

    /// A version component was missing or not a number.
    #[error("invalid {component} version component in {release:?}")]
    InvalidComponent {
        /// Which component failed ("major" or "minor")
        component: &'static str,
        /// The trimmed release string
        release: String,
    },
}

/// Parse a kernel release like `"5.10.0-1-amd64"` or `"6.1-rc3"` into `major.minor`.
pub fn parse_kernel_version(release: &str) -> Result<KernelVersion, KernelVersionError> {
    let release = release.trim();
    if release.is_empty() {
        return Err(KernelVersionError::Empty);
    }

    let invalid = |component: &'static str| KernelVersionError::InvalidComponent {
        component,
        release: release.to_string(),
    };

    let mut parts = release.split('.');
    let major = parts
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| invalid("major"))?;
    let minor = parts
        .next()
        .and_then(|s| s.split('-').next())
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| invalid("minor"))?;

    Ok(KernelVersion { major, minor })
}

/// Whether the running kernel could serve an io_uring backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoUringSupport {
    Supported,
    Unsupported,
    Unknown,
}

impl IoUringSupport {
    fn from_release(release: Option<&str>) -> Self {
        match release.map(parse_kernel_version) {
            Some(Ok(version)) if version.supports_io_uring() => IoUringSupport::Supported,
            Some(Ok(_)) => IoUringSupport::Unsupported,
            Some(Err(e)) => {
                tracing::debug!("Could not parse kernel release: {}", e);
                IoUringSupport::Unknown
            }
            None => IoUringSupport::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IoUringSupport::Supported => "io_uring capable",
            IoUringSupport::Unsupported => "io_uring unavailable (requires kernel >= 5.6)",
            IoUringSupport::Unknown => "io_uring support unknown",
        }
    }
}

/// Diagnostic snapshot of the environment the harness runs in.
#[derive(Debug, Clone)]
pub struct EnvironmentReport {
    pub version: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    pub cpus: usize,
    /// Raw kernel release, `None` when unreadable or not on Linux.
    pub kernel_release: Option<String>,
    pub io_uring: IoUringSupport,
}

impl EnvironmentReport {
    /// Collect the report. Never fails: unreadable sources degrade to "unknown".
    pub fn probe() -> Self {
        let kernel_release = read_kernel_release();
        let io_uring = if cfg!(target_os = "linux") {
            IoUringSupport::from_release(kernel_release.as_deref())
        } else {
            IoUringSupport::Unsupported
        };

        Self {
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            cpus: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            kernel_release,
            io_uring,
        }
    }

    /// Kernel release for display.
    pub fn kernel_label(&self) -> &str {
        match &self.kernel_release {
            Some(release) => release,
            None if cfg!(target_os = "linux") => "unknown",
            None => "N/A (not Linux)",
        }
    }
}

#[cfg(target_os = "linux")]
fn read_kernel_release() -> Option<String> {
    match std::fs::read_to_string(OSRELEASE_PATH) {
        Ok(s) => Some(s.trim().to_string()),
        Err(e) => {
            tracing::debug!("Failed to read {}: {}", OSRELEASE_PATH, e);
            None
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn read_kernel_release() -> Option<String> {
    None
}
