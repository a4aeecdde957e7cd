//! Step-aware progress display for one size bucket.
//!
//! Example output:
//! ```text
//!   ⠙ thread-pool / 64KB: Read (2/3)
//!   ██████████████░░░░░░░░░░░░░░░░░░░░░░░░░░
//! ```
//!
//! The bar belongs to a tracing span, so it is drawn by the `IndicatifLayer`
//! installed in `main` and shares its draw target with log lines. It only
//! redraws when a step starts; there is no ticker thread competing with the
//! measured loops. Without that layer installed the span is inert.

use crate::bench::PhaseProgress;
use indicatif::ProgressStyle;
use std::time::{Duration, Instant};
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Progress reporter for a bucket made of several measured steps.
pub struct PhaseProgressReporter {
    span: Span,
    color: bool,
    /// Prefix for the status line, e.g. "thread-pool / 64KB".
    label: String,
    start_time: Instant,
}

impl PhaseProgressReporter {
    /// Create a reporter for `total_phases` steps.
    pub fn new(label: &str, total_phases: usize, color: bool) -> Self {
        let span = tracing::info_span!("bucket", label = %label);

        let template = if color {
            "  {spinner:.cyan} {msg}\n  {bar:40.cyan/dim}"
        } else {
            "  {spinner} {msg}\n  {bar:40}"
        };
        // Template strings are static; a bad one would only lose styling.
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            span.pb_set_style(&style.progress_chars("█▓░").tick_strings(TICK_STRINGS));
        }
        span.pb_set_length(total_phases as u64);
        span.pb_set_message(&format!("{label}: starting"));
        span.pb_start();

        Self {
            span,
            color,
            label: label.to_string(),
            start_time: Instant::now(),
        }
    }

    /// Show the step that is about to run.
    pub fn update(&self, phase: &PhaseProgress) {
        self.span.pb_set_length(phase.total_phases as u64);
        self.span.pb_set_position(phase.phase_index as u64);
        self.span.pb_set_message(&self.message(phase));
    }

    fn message(&self, phase: &PhaseProgress) -> String {
        use owo_colors::OwoColorize;

        let counter = format!("({}/{})", phase.phase_index + 1, phase.total_phases);
        if self.color {
            format!("{}: {} {}", self.label, phase.phase_name.bold(), counter.dimmed())
        } else {
            format!("{}: {} {}", self.label, phase.phase_name, counter)
        }
    }

    /// Close the bar and return the elapsed time since creation.
    pub fn finish(self) -> Duration {
        let elapsed = self.start_time.elapsed();
        drop(self.span);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(phase_name: &'static str, phase_index: usize) -> PhaseProgress {
        PhaseProgress {
            phase_name,
            phase_index,
            total_phases: 3,
        }
    }

    #[test]
    fn test_message_counts_from_one() {
        let reporter = PhaseProgressReporter::new("inline / 1KB", 3, false);
        assert_eq!(reporter.message(&step("Write", 0)), "inline / 1KB: Write (1/3)");
        assert_eq!(reporter.message(&step("Stat", 2)), "inline / 1KB: Stat (3/3)");
    }

    #[test]
    fn test_finish_reports_elapsed() {
        let reporter = PhaseProgressReporter::new("thread-pool / 4MB", 3, true);
        reporter.update(&step("Read", 1));
        std::thread::sleep(Duration::from_millis(2));
        assert!(reporter.finish() >= Duration::from_millis(2));
    }
}
