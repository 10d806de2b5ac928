//! Progress display for packaging runs

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while an archive is being built
pub struct ProgressDisplay {
    spinner: ProgressBar,
}

impl ProgressDisplay {
    /// Start a spinner describing the packaging run
    pub fn start(asset_count: usize, rendition_count: usize) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(format!(
            "Packing {asset_count} asset(s) x {rendition_count} rendition(s)..."
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }

    /// Stop the spinner and clear its line
    pub fn finish(self) {
        self.spinner.finish_and_clear();
    }
}
