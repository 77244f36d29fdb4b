//! Per-partition task execution: bounded intake, completion signalling, and
//! the serialized worker unit.

pub mod completion;
mod intake;
pub mod pipeline;
pub mod request;
pub mod unit;

pub use completion::{CompletionHandle, CompletionWatcher};
pub use intake::RejectedTask;
pub use pipeline::{ProcessFuture, TaskOutcome, TaskPipeline};
pub use request::TaskRequest;
pub use unit::ProcessorUnit;
