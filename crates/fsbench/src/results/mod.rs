//! Results processing and console output.
//!
//! - `PhaseProgressReporter` shows which step of a bucket is running
//! - `BenchmarkPrinter` prints results as they arrive and a backend comparison

pub mod format;
pub mod phase_progress;
pub mod printer;

pub use format::{format_ms, format_percentage, format_speedup, speedup_indicator};
pub use phase_progress::PhaseProgressReporter;
pub use printer::BenchmarkPrinter;
