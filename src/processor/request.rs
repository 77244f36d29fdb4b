use std::fmt;

use crate::common::{TaskMetadata, TopicPartition};
use crate::processor::completion::CompletionHandle;

/// One unit of work extracted from the partitioned log.
///
/// Built by the consumer/poller and owned exclusively by the processor unit
/// from submission until the unit settles the completion handle. Never
/// mutated.
pub struct TaskRequest {
    /// Source topic and partition the task was read from.
    pub source: TopicPartition,
    /// Offset of the task within its partition.
    pub offset: i64,
    /// Metadata recorded by an earlier attempt, when this is a retry.
    pub metadata: Option<TaskMetadata>,
    /// Raw serialized task payload.
    pub payload: Vec<u8>,
    completion: CompletionHandle,
}

impl TaskRequest {
    pub fn new(
        source: TopicPartition,
        offset: i64,
        completion: CompletionHandle,
        metadata: Option<TaskMetadata>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            source,
            offset,
            metadata,
            payload,
            completion,
        }
    }

    /// Stable task id in topic:partition:offset format.
    pub fn id(&self) -> String {
        format!("{}:{}", self.source, self.offset)
    }

    /// Marks the task as handled. Idempotent.
    pub fn complete(&self) {
        self.completion.complete();
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }
}

impl fmt::Debug for TaskRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRequest")
            .field("source", &self.source)
            .field("offset", &self.offset)
            .field("metadata", &self.metadata)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
