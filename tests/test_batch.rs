//! Integration tests for the batch sender, end to end from a CSV file
//! through the submitter seam.

use std::sync::atomic::{AtomicBool, Ordering};

use pressmap::batch::{
    run_batch, PostSubmitter, RowOutcome, SubmitAction, SubmitError, SubmitOutcome,
};
use pressmap::source::read_csv;
use pressmap::wordpress::PostPayload;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

/// In-memory submitter that fails on the given 1-based call numbers and
/// keeps every payload it received.
struct FakeWordPress {
    calls: usize,
    fail_on: Vec<usize>,
    received: Vec<PostPayload>,
}

impl FakeWordPress {
    fn new(fail_on: Vec<usize>) -> Self {
        Self {
            calls: 0,
            fail_on,
            received: Vec::new(),
        }
    }
}

impl PostSubmitter for FakeWordPress {
    fn submit(&mut self, payload: &PostPayload) -> Result<SubmitOutcome, SubmitError> {
        self.calls += 1;
        self.received.push(payload.clone());
        if self.fail_on.contains(&self.calls) {
            Err(SubmitError {
                status: Some(500),
                detail: "HTTP 500: internal server error".to_string(),
            })
        } else {
            Ok(SubmitOutcome {
                post_id: 100 + self.calls as u64,
                action: SubmitAction::Created,
            })
        }
    }
}

#[test]
fn test_two_rows_both_succeed() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(&dir, "posts.csv", "title,body\nHello,World\nFoo,Bar\n");
    let dataset = read_csv(&path).unwrap();
    let mapping = common::title_body_mapping();
    mapping.validate().unwrap();

    let mut wp = FakeWordPress::new(vec![]);
    let cancel = AtomicBool::new(false);
    let result = run_batch(&dataset, &mapping, &mut wp, None, &cancel, |_| {});

    assert_eq!(result.success, 2);
    assert!(result.failures.is_empty());
    assert_eq!(wp.received.len(), 2);
    assert_eq!(wp.received[0].title, "Hello");
    assert_eq!(wp.received[0].content.as_deref(), Some("World"));
    assert_eq!(wp.received[1].title, "Foo");
}

#[test]
fn test_second_row_http_500_first_post_still_created() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(&dir, "posts.csv", "title,body\nHello,World\nFoo,Bar\n");
    let dataset = read_csv(&path).unwrap();
    let mapping = common::title_body_mapping();

    let mut wp = FakeWordPress::new(vec![2]);
    let cancel = AtomicBool::new(false);
    let result = run_batch(&dataset, &mapping, &mut wp, None, &cancel, |_| {});

    assert_eq!(result.success, 1);
    assert_eq!(result.failed_rows(), vec![2]);
    assert!(result.failures[0].message.starts_with("HTTP 500"));
    // The first row's post went out before the second row failed.
    assert_eq!(wp.received.len(), 2);
    assert_eq!(wp.received[0].title, "Hello");
}

#[test]
fn test_every_row_attempted_despite_midway_failure() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(
        &dir,
        "posts.csv",
        "title,body\na,1\nb,2\nc,3\nd,4\ne,5\n",
    );
    let dataset = read_csv(&path).unwrap();
    let mapping = common::title_body_mapping();

    let mut wp = FakeWordPress::new(vec![3]);
    let cancel = AtomicBool::new(false);
    let result = run_batch(&dataset, &mapping, &mut wp, None, &cancel, |_| {});

    assert_eq!(result.attempted, 5);
    assert_eq!(result.success, 4);
    assert_eq!(result.failed_rows(), vec![3]);
}

#[test]
fn test_rerun_of_failed_rows_only() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(&dir, "posts.csv", "title,body\na,1\nb,2\nc,3\n");
    let dataset = read_csv(&path).unwrap();
    let mapping = common::title_body_mapping();
    let cancel = AtomicBool::new(false);

    let mut wp = FakeWordPress::new(vec![2]);
    let first = run_batch(&dataset, &mapping, &mut wp, None, &cancel, |_| {});
    assert_eq!(first.failed_rows(), vec![2]);

    // Manual retry restricted to the failed rows.
    let mut wp = FakeWordPress::new(vec![]);
    let retry = run_batch(
        &dataset,
        &mapping,
        &mut wp,
        Some(&first.failed_rows()),
        &cancel,
        |_| {},
    );

    assert_eq!(retry.attempted, 1);
    assert_eq!(retry.success, 1);
    assert_eq!(wp.received[0].title, "b");
}

#[test]
fn test_progress_events_carry_row_outcomes() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(&dir, "posts.csv", "title,body\na,1\nb,2\n");
    let dataset = read_csv(&path).unwrap();
    let mapping = common::title_body_mapping();

    let mut wp = FakeWordPress::new(vec![2]);
    let cancel = AtomicBool::new(false);
    let mut seen = Vec::new();
    run_batch(&dataset, &mapping, &mut wp, None, &cancel, |event| {
        seen.push((event.processed, event.total, event.outcome.clone()));
    });

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, 1);
    assert_eq!(seen[0].1, 2);
    assert!(matches!(seen[0].2, RowOutcome::Created { row: 1, .. }));
    assert!(matches!(seen[1].2, RowOutcome::Failed { row: 2, .. }));
}

#[test]
fn test_cancellation_stops_between_rows() {
    let dir = TempDir::new().unwrap();
    let path = common::write_csv(&dir, "posts.csv", "title,body\na,1\nb,2\nc,3\nd,4\n");
    let dataset = read_csv(&path).unwrap();
    let mapping = common::title_body_mapping();

    let mut wp = FakeWordPress::new(vec![]);
    let cancel = AtomicBool::new(false);
    let result = run_batch(&dataset, &mapping, &mut wp, None, &cancel, |event| {
        if event.processed == 1 {
            cancel.store(true, Ordering::Relaxed);
        }
    });

    assert!(result.cancelled);
    assert_eq!(result.attempted, 1, "in-flight row finished, next never started");
    assert_eq!(result.success, 1);
}
