use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::errors::{Error, Result};
use crate::processor::request::TaskRequest;

/// Completion future returned by a pipeline: already resolved, deferred, or
/// resolving with an error.
pub type ProcessFuture = BoxFuture<'static, Result<()>>;

/// Processing pipeline a unit dispatches tasks into.
///
/// The call itself covers the synchronous part of processing; the returned
/// future resolves once any deferred work has finished. An error raised by
/// the call and an error the future resolves with are classified identically
/// by the unit.
#[async_trait]
pub trait TaskPipeline: Send + Sync {
    async fn process(&self, task: &TaskRequest) -> Result<ProcessFuture>;
}

/// Terminal classification of one dispatched task.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Pipeline resolved without error.
    Completed,
    /// Pipeline failed with a plain error.
    Failed(Error),
    /// Pipeline raised the cancellation signal, or the dispatch was
    /// preempted by the unit.
    Cancelled,
}

impl TaskOutcome {
    /// Folds a pipeline result into the outcome taxonomy.
    pub fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => TaskOutcome::Completed,
            Err(e) if e.is_cancelled() => TaskOutcome::Cancelled,
            Err(e) => TaskOutcome::Failed(e),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            TaskOutcome::Completed => "completed",
            TaskOutcome::Failed(_) => "failed",
            TaskOutcome::Cancelled => "cancelled",
        }
    }
}
