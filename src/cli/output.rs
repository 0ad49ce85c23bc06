//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress spinners,
//! status prefixes, and formatted errors to the user.

use indicatif::{ProgressBar, ProgressStyle};

/// Output preferences derived from the global CLI flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Machine-readable output
    pub json: bool,
    /// Verbosity level (-v count)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output preferences from the global flags
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Whether human-oriented messages and spinners should be shown
    pub fn is_interactive(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Log level for the tracing subscriber
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            _ if self.quiet => tracing::Level::ERROR,
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Print a success message unless output is quiet or JSON
    pub fn success(&self, message: &str) {
        if self.is_interactive() {
            println!("{} {message}", status::SUCCESS);
        }
    }
}

/// Create a spinner for operations with unknown duration
///
/// Returns a hidden spinner when output is not interactive.
pub fn create_spinner(message: &str, output: &OutputConfig) -> ProgressBar {
    if !output.is_interactive() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print an error with its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}
