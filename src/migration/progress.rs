//! Progress reporting for the matching and update phases.

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{msg} |{bar:40.green}| {percent}% || {pos}/{len} Scenes || ETA: {eta}";

/// Receives `(done, total)` after each unit of work.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, done: usize, total: usize);
}

/// Observer that ignores all notifications.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _done: usize, _total: usize) {}
}

/// Terminal progress bar.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a bar labelled `label` for `total` items.
    ///
    /// With `visible` false the bar is hidden but still tracks position.
    pub fn new(label: &str, total: usize, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_length(total as u64);

        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        bar.set_message(label.to_string());

        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_progress(&self, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
    }
}
