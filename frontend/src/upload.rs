//! Admin on-behalf uploads as an explicit task list.
//!
//! One task per (file, recipient) pair. Tasks run sequentially and
//! completed tasks are never re-run, so a retry touches only the failed
//! subset. The sink seam keeps the batch logic testable off-browser.

use async_trait::async_trait;
use gpportal_shared::{UploadMeta, UserSummary};

use crate::api::{Api, ApiError};

/// Where a task's bytes go. The production sink posts the admin multipart
/// endpoint; tests substitute their own.
#[async_trait(?Send)]
pub trait UploadSink {
    type File;

    async fn upload(
        &self,
        file: &Self::File,
        recipient: &UserSummary,
        meta: &UploadMeta,
    ) -> Result<i64, ApiError>;
}

/// One file queued for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadItem<F> {
    pub file: F,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    InFlight,
    /// Uploaded; holds the backend's document id.
    Done(i64),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
struct UploadTask<F> {
    item: UploadItem<F>,
    recipient: UserSummary,
    state: TaskState,
}

/// Plain-data view of a task for rendering and progress reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSnapshot {
    pub file_name: String,
    pub recipient: UserSummary,
    pub state: TaskState,
}

/// Aggregate outcome. Success only when every pair succeeded; failures
/// keep their messages so the UI can name the exact (file, recipient)
/// pairs that need attention.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: Vec<TaskSnapshot>,
    pub failed: Vec<TaskSnapshot>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.succeeded.len() == self.total
    }
}

pub struct UploadBatch<S: UploadSink> {
    sink: S,
    meta: UploadMeta,
    tasks: Vec<UploadTask<S::File>>,
}

impl<S: UploadSink> UploadBatch<S>
where
    S::File: Clone,
{
    /// Cross-product plan: every file to every recipient, in selection
    /// order.
    pub fn new(
        sink: S,
        files: Vec<UploadItem<S::File>>,
        recipients: Vec<UserSummary>,
        meta: UploadMeta,
    ) -> Self {
        let mut tasks = Vec::with_capacity(files.len() * recipients.len());
        for file in &files {
            for recipient in &recipients {
                tasks.push(UploadTask {
                    item: file.clone(),
                    recipient: recipient.clone(),
                    state: TaskState::Pending,
                });
            }
        }
        Self { sink, meta, tasks }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn snapshots(&self) -> Vec<TaskSnapshot> {
        self.tasks
            .iter()
            .map(|task| TaskSnapshot {
                file_name: task.item.name.clone(),
                recipient: task.recipient.clone(),
                state: task.state.clone(),
            })
            .collect()
    }

    /// Run every pending task in order, one request per task. `progress`
    /// fires after each state change with a fresh snapshot set.
    pub async fn run(&mut self, mut progress: impl FnMut(Vec<TaskSnapshot>)) -> BatchReport {
        for index in 0..self.tasks.len() {
            if self.tasks[index].state != TaskState::Pending {
                continue;
            }
            self.tasks[index].state = TaskState::InFlight;
            progress(self.snapshots());

            let outcome = self
                .sink
                .upload(
                    &self.tasks[index].item.file,
                    &self.tasks[index].recipient,
                    &self.meta,
                )
                .await;
            self.tasks[index].state = match outcome {
                Ok(document_id) => TaskState::Done(document_id),
                Err(err) => {
                    log::error!(
                        "upload of {} for {} failed: {err}",
                        self.tasks[index].item.name,
                        self.tasks[index].recipient.email
                    );
                    TaskState::Failed(err.to_string())
                }
            };
            progress(self.snapshots());
        }
        self.report()
    }

    /// Flip failed tasks back to pending; completed tasks stay done.
    pub fn reset_failed(&mut self) {
        for task in &mut self.tasks {
            if matches!(task.state, TaskState::Failed(_)) {
                task.state = TaskState::Pending;
            }
        }
    }

    pub fn report(&self) -> BatchReport {
        let mut report = BatchReport {
            total: self.tasks.len(),
            ..BatchReport::default()
        };
        for task in &self.tasks {
            let snapshot = TaskSnapshot {
                file_name: task.item.name.clone(),
                recipient: task.recipient.clone(),
                state: task.state.clone(),
            };
            match task.state {
                TaskState::Done(_) => report.succeeded.push(snapshot),
                TaskState::Failed(_) => report.failed.push(snapshot),
                _ => {}
            }
        }
        report
    }
}

/// Production sink: the admin multipart endpoint through a component's
/// scoped [`Api`] handle, so leaving the page aborts an in-flight upload.
#[derive(Clone)]
pub struct AdminUploadSink {
    api: Api,
}

impl AdminUploadSink {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl UploadSink for AdminUploadSink {
    type File = web_sys::File;

    async fn upload(
        &self,
        file: &Self::File,
        recipient: &UserSummary,
        meta: &UploadMeta,
    ) -> Result<i64, ApiError> {
        let receipt = self
            .api
            .admin_upload_for_user(file, recipient.id, meta)
            .await?;
        Ok(receipt.id.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests;
