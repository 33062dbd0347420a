//! Progress indicators
//!
//! Async distance computations report the share of the first input already
//! processed. [`percent_bar`] renders those reports.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a 0–100 bar for percentage progress
pub fn percent_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos:>3}% ({elapsed})")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Move a percentage bar to `percent`, clamped to 0–100
pub fn set_percent(pb: &ProgressBar, percent: f64) {
    pb.set_position(percent.clamp(0.0, 100.0).floor() as u64);
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.abandon_with_message(format!("✗ {}", message));
}
