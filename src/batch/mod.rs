//! Batch sender: the sequential row loop.
//!
//! Rows are processed strictly in source order, one at a time. Each row is
//! resolved into a payload, submitted, and classified; a failed row is
//! recorded and the loop continues, so a single row's failure never aborts
//! the batch. After every row a progress event is handed to the observer
//! callback. A cancellation flag is checked between rows; a cancelled run
//! returns a partial result rather than an error.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::ValueEnum;
use serde::Serialize;

use crate::error::PressmapError;
use crate::mapping::FieldMapping;
use crate::source::Dataset;
use crate::wordpress::{build_payload, PostPayload};

/// What to do when a row would collide with an existing post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Always create a new post.
    Create,
    /// Upsert by slug: update the existing post with the payload's slug,
    /// create otherwise. Requires the slug field to be mapped.
    Update,
}

/// A single submission failure: HTTP error status, transport failure, or an
/// unusable success response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    /// HTTP status code, when the server responded at all.
    pub status: Option<u16>,
    pub detail: String,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for SubmitError {}

/// How a successful submission landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Created,
    Updated,
}

/// Result of one successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub post_id: u64,
    pub action: SubmitAction,
}

/// Seam between the batch loop and the transport. The production
/// implementation talks to WordPress; tests script outcomes in memory.
pub trait PostSubmitter {
    fn submit(&mut self, payload: &PostPayload) -> Result<SubmitOutcome, SubmitError>;
}

/// Submitter that prints each payload instead of sending it. Used by
/// `--dry-run` to verify a mapping without touching the network.
#[derive(Debug, Default)]
pub struct DryRunSubmitter {
    printed: usize,
}

impl PostSubmitter for DryRunSubmitter {
    fn submit(&mut self, payload: &PostPayload) -> Result<SubmitOutcome, SubmitError> {
        self.printed += 1;
        let json = serde_json::to_string_pretty(payload)
            .unwrap_or_else(|e| format!("<unserializable payload: {}>", e));
        println!("{}", json);
        Ok(SubmitOutcome {
            post_id: 0,
            action: SubmitAction::Created,
        })
    }
}

/// One row's failure, with enough context to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based row number within the dataset.
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl From<&RowFailure> for PressmapError {
    /// View the failure as the crate error it was recorded from, for
    /// display in the summary and log.
    fn from(failure: &RowFailure) -> Self {
        PressmapError::PostSubmit {
            row: failure.row,
            status: failure.status,
            detail: failure.message.clone(),
        }
    }
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Rows attempted (equals the selection size unless cancelled).
    pub attempted: usize,
    pub success: usize,
    pub failures: Vec<RowFailure>,
    /// True when the run stopped early on the cancellation flag.
    pub cancelled: bool,
}

impl RunResult {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// 1-based row numbers of the failed rows, for a manual `--rows` re-run.
    pub fn failed_rows(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.row).collect()
    }
}

/// Per-row outcome as seen by the progress observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Created { row: usize, post_id: u64 },
    Updated { row: usize, post_id: u64 },
    Failed { row: usize, message: String },
}

/// Progress event emitted synchronously after every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent<'a> {
    pub processed: usize,
    pub total: usize,
    pub outcome: &'a RowOutcome,
}

/// Run the batch over `dataset` with a validated `mapping`.
///
/// `rows` restricts the run to the given 1-based row numbers (out-of-range
/// numbers are ignored, duplicates collapsed); `None` runs every row. The
/// observer must not fail: it is a rendering hook, and the loop ignores
/// anything it does.
pub fn run_batch<S, F>(
    dataset: &Dataset,
    mapping: &FieldMapping,
    submitter: &mut S,
    rows: Option<&[usize]>,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> RunResult
where
    S: PostSubmitter,
    F: FnMut(&ProgressEvent<'_>),
{
    let selected = select_rows(dataset.row_count(), rows);
    let total = selected.len();
    let mut result = RunResult::default();

    for (processed, row_number) in selected.into_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            result.cancelled = true;
            break;
        }

        let payload = build_payload(dataset, row_number - 1, mapping);
        let outcome = match submitter.submit(&payload) {
            Ok(SubmitOutcome { post_id, action }) => {
                result.success += 1;
                match action {
                    SubmitAction::Created => RowOutcome::Created {
                        row: row_number,
                        post_id,
                    },
                    SubmitAction::Updated => RowOutcome::Updated {
                        row: row_number,
                        post_id,
                    },
                }
            }
            Err(SubmitError { status, detail }) => {
                result.failures.push(RowFailure {
                    row: row_number,
                    status,
                    message: detail.clone(),
                });
                RowOutcome::Failed {
                    row: row_number,
                    message: detail,
                }
            }
        };
        result.attempted += 1;

        on_progress(&ProgressEvent {
            processed: processed + 1,
            total,
            outcome: &outcome,
        });
    }

    result
}

/// Resolve a row selection to ordered, deduplicated 1-based row numbers.
/// Out-of-range numbers are dropped; `None` selects every row. The batch
/// loop and the pre-run row count both go through this.
pub fn select_rows(row_count: usize, rows: Option<&[usize]>) -> Vec<usize> {
    match rows {
        None => (1..=row_count).collect(),
        Some(filter) => {
            let mut selected: Vec<usize> = filter
                .iter()
                .copied()
                .filter(|&r| r >= 1 && r <= row_count)
                .collect();
            selected.sort_unstable();
            selected.dedup();
            selected
        }
    }
}
