use metrics::gauge;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::errors::{Error, ErrorKind, QueueError};
use crate::processor::request::TaskRequest;

/// A submission the unit refused, handing task ownership back to the caller.
#[derive(Debug, Error)]
#[error("task submission rejected: {reason}")]
pub struct RejectedTask {
    /// The task that was not accepted.
    pub task: TaskRequest,
    /// Why it was refused.
    pub reason: QueueError,
}

impl From<RejectedTask> for Error {
    fn from(rejected: RejectedTask) -> Self {
        Error::new(ErrorKind::Queue, Some(rejected.reason))
    }
}

/// Bounded FIFO intake feeding one worker.
pub(crate) struct IntakeQueue {
    tx: mpsc::Sender<TaskRequest>,
    scope_label: String,
}

pub(crate) fn intake(
    capacity: usize,
    scope_label: String,
) -> (IntakeQueue, mpsc::Receiver<TaskRequest>) {
    let (tx, rx) = mpsc::channel(capacity);
    (IntakeQueue { tx, scope_label }, rx)
}

impl IntakeQueue {
    /// Enqueues without blocking, surfacing back-pressure to the caller.
    pub(crate) fn offer(&self, task: TaskRequest) -> Result<(), RejectedTask> {
        match self.tx.try_send(task) {
            Ok(()) => {
                gauge!("processor_queued_tasks", "scope" => self.scope_label.clone())
                    .increment(1.0);
                Ok(())
            }
            Err(TrySendError::Full(task)) => Err(RejectedTask {
                task,
                reason: QueueError::Full,
            }),
            Err(TrySendError::Closed(task)) => Err(RejectedTask {
                task,
                reason: QueueError::Closed,
            }),
        }
    }
}
