use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use gpportal_shared::{UploadMeta, UserSummary};

use super::*;
use crate::api::ApiError;

// =========================================================
// Test double
// =========================================================

/// Sink that records every call and fails the pairs it is told to.
#[derive(Clone, Default)]
struct RecordingSink {
    calls: Rc<RefCell<Vec<(String, i64)>>>,
    fail_for: Rc<RefCell<HashSet<(String, i64)>>>,
}

impl RecordingSink {
    fn fail(&self, file: &str, recipient_id: i64) {
        self.fail_for
            .borrow_mut()
            .insert((file.to_string(), recipient_id));
    }

    fn heal(&self) {
        self.fail_for.borrow_mut().clear();
    }

    fn calls(&self) -> Vec<(String, i64)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl UploadSink for RecordingSink {
    type File = String;

    async fn upload(
        &self,
        file: &Self::File,
        recipient: &UserSummary,
        _meta: &UploadMeta,
    ) -> Result<i64, ApiError> {
        self.calls.borrow_mut().push((file.clone(), recipient.id));
        if self
            .fail_for
            .borrow()
            .contains(&(file.clone(), recipient.id))
        {
            Err(ApiError::Server("storage offline".into()))
        } else {
            Ok(recipient.id * 100)
        }
    }
}

fn user(id: i64) -> UserSummary {
    UserSummary {
        id,
        email: format!("user{id}@example.com"),
    }
}

fn item(name: &str) -> UploadItem<String> {
    UploadItem {
        file: format!("{name}-bytes"),
        name: name.to_string(),
    }
}

// =========================================================
// Batch behaviour
// =========================================================

#[tokio::test]
async fn one_request_per_file_recipient_pair() {
    let sink = RecordingSink::default();
    let handle = sink.clone();
    let mut batch = UploadBatch::new(
        sink,
        vec![item("void-check.pdf")],
        vec![user(1), user(2), user(3)],
        UploadMeta::default(),
    );

    let report = batch.run(|_| {}).await;

    assert_eq!(report.total, 3);
    assert!(report.all_succeeded());
    assert_eq!(
        handle.calls(),
        vec![
            ("void-check.pdf-bytes".to_string(), 1),
            ("void-check.pdf-bytes".to_string(), 2),
            ("void-check.pdf-bytes".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn cross_product_covers_every_pair_in_order() {
    let sink = RecordingSink::default();
    let handle = sink.clone();
    let mut batch = UploadBatch::new(
        sink,
        vec![item("k1.pdf"), item("tax.pdf")],
        vec![user(1), user(2)],
        UploadMeta::default(),
    );

    let report = batch.run(|_| {}).await;

    assert_eq!(report.total, 4);
    assert_eq!(handle.calls().len(), 4);
    assert_eq!(
        handle.calls(),
        vec![
            ("k1.pdf-bytes".to_string(), 1),
            ("k1.pdf-bytes".to_string(), 2),
            ("tax.pdf-bytes".to_string(), 1),
            ("tax.pdf-bytes".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn partial_failure_names_the_failed_pairs() {
    let sink = RecordingSink::default();
    sink.fail("k1.pdf-bytes", 2);
    let mut batch = UploadBatch::new(
        sink,
        vec![item("k1.pdf")],
        vec![user(1), user(2), user(3)],
        UploadMeta::default(),
    );

    let report = batch.run(|_| {}).await;

    assert!(!report.all_succeeded());
    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    let failed = &report.failed[0];
    assert_eq!(failed.file_name, "k1.pdf");
    assert_eq!(failed.recipient.id, 2);
    match &failed.state {
        TaskState::Failed(reason) => assert!(reason.contains("storage offline")),
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn retry_reruns_only_the_failed_subset() {
    let sink = RecordingSink::default();
    let handle = sink.clone();
    sink.fail("k1.pdf-bytes", 2);
    let mut batch = UploadBatch::new(
        sink,
        vec![item("k1.pdf")],
        vec![user(1), user(2), user(3)],
        UploadMeta::default(),
    );

    let first = batch.run(|_| {}).await;
    assert_eq!(first.failed.len(), 1);
    assert_eq!(handle.calls().len(), 3);

    handle.heal();
    batch.reset_failed();
    let second = batch.run(|_| {}).await;

    // Only the failed pair went over the wire again.
    assert_eq!(handle.calls().len(), 4);
    assert_eq!(handle.calls()[3], ("k1.pdf-bytes".to_string(), 2));
    assert!(second.all_succeeded());
    // Earlier successes kept their document ids.
    assert!(batch
        .snapshots()
        .iter()
        .all(|s| matches!(s.state, TaskState::Done(_))));
}

#[tokio::test]
async fn progress_fires_on_every_state_change() {
    let sink = RecordingSink::default();
    let mut batch = UploadBatch::new(
        sink,
        vec![item("k1.pdf")],
        vec![user(1), user(2)],
        UploadMeta::default(),
    );

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink_seen = seen.clone();
    batch
        .run(move |snapshot| sink_seen.borrow_mut().push(snapshot))
        .await;

    // In-flight plus terminal, per task.
    let snapshots = seen.borrow();
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[0][0].state, TaskState::InFlight);
    assert_eq!(snapshots[0][1].state, TaskState::Pending);
}

#[tokio::test]
async fn empty_selection_is_a_noop() {
    let sink = RecordingSink::default();
    let handle = sink.clone();
    let mut batch: UploadBatch<RecordingSink> =
        UploadBatch::new(sink, Vec::new(), vec![user(1)], UploadMeta::default());

    assert!(batch.is_empty());
    let report = batch.run(|_| {}).await;
    assert_eq!(report.total, 0);
    assert!(handle.calls().is_empty());
}
