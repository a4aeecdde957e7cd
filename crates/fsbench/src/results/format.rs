//! Number formatting for console output.

/// Format a duration in milliseconds with fixed precision.
pub fn format_ms(ms: f64) -> String {
    format!("{ms:.2} ms")
}

/// Format a speedup ratio, e.g. `1.45x`.
pub fn format_speedup(speedup: f64) -> String {
    format!("{speedup:.2}x")
}

/// Format a signed percentage, e.g. `+12.5%`.
pub fn format_percentage(percent: f64) -> String {
    format!("{percent:+.1}%")
}

/// Coarse verdict for a speedup ratio (candidate vs baseline).
pub fn speedup_indicator(speedup: f64) -> &'static str {
    if speedup > 1.2 {
        "faster"
    } else if speedup > 1.0 {
        "slightly faster"
    } else if speedup > 0.9 {
        "about equal"
    } else {
        "slower"
    }
}
