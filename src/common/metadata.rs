use serde::{Deserialize, Serialize};

/// Metadata recorded by an earlier processing attempt of the same task.
///
/// Carried alongside the payload when a task re-enters the log after a retry
/// hand-off. Fields absent on the wire decode to their defaults so older
/// producers stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetadata {
    /// Time the task was originally produced, epoch milliseconds.
    #[serde(default)]
    pub timestamp_ms: u64,
    /// Application that produced the task.
    #[serde(default)]
    pub source_application_id: Option<String>,
    /// Producer instance within the source application.
    #[serde(default)]
    pub source_instance_id: Option<String>,
    /// Number of attempts completed before this one.
    #[serde(default)]
    pub retry_count: u32,
    /// Earliest time the task should run, epoch milliseconds.
    #[serde(default)]
    pub scheduled_time_ms: Option<u64>,
}

impl TaskMetadata {
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// True when the task has been attempted before.
    pub fn is_retry(&self) -> bool {
        self.retry_count > 0
    }
}
