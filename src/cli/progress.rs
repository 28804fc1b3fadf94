//! Terminal progress indicator for run retrieval.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use runsweep::ProgressObserver;

const TEMPLATE: &str = "{spinner:.cyan} {prefix} [{bar:40.cyan/blue}] {pos}/{len} runs";

/// Progress bar drawn on stderr, hidden when stderr is not a terminal.
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    /// Creates an indicator on stderr, or a hidden one when output is piped.
    pub fn for_stderr() -> Self {
        if !io::stderr().is_terminal() {
            return Self::hidden();
        }
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style);
        }
        bar.set_prefix("Fetching workflow runs");
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Creates an indicator that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Removes the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for RunProgress {
    fn on_progress(&mut self, fetched: usize, total: u64) {
        let position = u64::try_from(fetched).unwrap_or(u64::MAX);
        self.bar.set_length(total.max(position));
        self.bar.set_position(position);
    }
}
