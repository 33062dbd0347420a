//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Duration;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Result of one distance computation, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    /// Edit distance
    pub distance: usize,
    /// Length of the first input in characters
    pub len_a: usize,
    /// Length of the second input in characters
    pub len_b: usize,
    /// Policy description, e.g. "exact" or "collator(base)"
    pub policy: String,
    /// Driver that produced the result
    pub mode: &'static str,
    /// Wall-clock time in milliseconds
    pub elapsed_ms: f64,
}

impl DistanceReport {
    /// Human-readable multi-line rendering
    pub fn render(&self) -> String {
        format!(
            "{} {}\n  inputs: {} / {}\n  policy: {} ({})\n  time:   {}",
            "distance:".bold(),
            self.distance,
            format_count(self.len_a, "char", "chars"),
            format_count(self.len_b, "char", "chars"),
            self.policy,
            self.mode,
            format_duration(Duration::from_secs_f64(self.elapsed_ms / 1000.0)),
        )
    }
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_mins() {
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(2048), "2.00 KB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "char", "chars"), "1 char");
        assert_eq!(format_count(0, "char", "chars"), "0 chars");
    }

    #[test]
    fn test_report_render_and_json() {
        let report = DistanceReport {
            distance: 3,
            len_a: 6,
            len_b: 7,
            policy: "exact".to_string(),
            mode: "sync",
            elapsed_ms: 0.2,
        };
        let text = report.render();
        assert!(text.contains("6 chars"));
        assert!(text.contains("exact (sync)"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["distance"], 3);
        assert_eq!(json["mode"], "sync");
    }
}
