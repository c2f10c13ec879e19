//! Run reporting: live progress rendering and the final summary.

mod progress_reporter;
mod summary;

pub use progress_reporter::ProgressReporter;
pub use summary::{write_report, RunSummary};
