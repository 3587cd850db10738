//! Busy indicator for terminal UI using indicatif crate

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// A wrapper around indicatif's ProgressBar for easy spinner management
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a new spinner drawn on stderr with the given message
    pub fn new(message: &str) -> Self {
        Self::with_target(message, ProgressDrawTarget::stderr())
    }

    /// A spinner that never draws (pipes, tests)
    pub fn hidden(message: &str) -> Self {
        Self::with_target(message, ProgressDrawTarget::hidden())
    }

    fn with_target(message: &str, target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(None, target);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.tick();

        Self { pb }
    }

    /// Finish the spinner and clear the line
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_lifecycle() {
        let spinner = Spinner::hidden("Testing spinner");
        assert!(!spinner.pb.is_finished());
        assert_eq!(spinner.pb.message(), "Testing spinner");
        spinner.finish_and_clear();
        assert!(spinner.pb.is_finished());
    }
}
