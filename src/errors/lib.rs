pub mod error;

pub use error::{BoxError, Error, ErrorKind, ProcessError, QueueError, Result};
