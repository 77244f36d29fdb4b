// Common Traits and Structs
pub use crate::common::{
    PartitionScope, ProcessorConfig, SubscriptionScope, TaskMetadata, TopicPartition, WorkerScope,
};
pub use crate::processor::{
    CompletionHandle, CompletionWatcher, ProcessFuture, ProcessorUnit, RejectedTask, TaskOutcome,
    TaskPipeline, TaskRequest,
};

// Errors
pub use crate::errors::{BoxError, Error, ErrorKind, ProcessError, QueueError, Result};
