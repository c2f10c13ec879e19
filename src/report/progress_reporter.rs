//! Live progress rendering for a batch run.
//!
//! The reporter is a pure rendering hook: its API is infallible, so nothing
//! that happens while drawing can abort the batch loop.

use console::style;
use indicatif::ProgressBar;

use crate::batch::{ProgressEvent, RowOutcome};
use crate::utils::create_row_progress;

/// Renders a progress bar plus a running log of per-row failures.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        Self {
            bar: create_row_progress(total as u64, "Sending rows"),
        }
    }

    /// Called synchronously after every row.
    pub fn report(&self, event: &ProgressEvent<'_>) {
        self.bar.set_position(event.processed as u64);
        match event.outcome {
            RowOutcome::Failed { row, message } => {
                self.bar.println(format!(
                    "    {} row {}: {}",
                    style("✗").red().bold(),
                    row,
                    style(message).red()
                ));
            }
            RowOutcome::Updated { row, post_id } => {
                self.bar.println(format!(
                    "    {} row {} updated post {}",
                    style("↻").cyan(),
                    row,
                    post_id
                ));
            }
            RowOutcome::Created { .. } => {}
        }
    }

    pub fn finish(&self, cancelled: bool) {
        if cancelled {
            self.bar.abandon_with_message("cancelled".to_string());
        } else {
            self.bar.finish_with_message("done".to_string());
        }
    }
}
