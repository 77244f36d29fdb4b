use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Boxed error detail type shared across the crate.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Queue,
    Process,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Queue => write!(f, "queue"),
            ErrorKind::Process => write!(f, "process"),
        }
    }
}

pub struct ErrorInner {
    pub kind: ErrorKind,
    pub source: Option<BoxError>,
    pub message: Option<String>,
}

pub struct Error {
    pub inner: Box<ErrorInner>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(ErrorInner {
                kind,
                source: source.map(Into::into),
                message: None,
            }),
        }
    }

    pub fn with_message<E>(kind: ErrorKind, message: String, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(ErrorInner {
                kind,
                source: source.map(Into::into),
                message: Some(message),
            }),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    pub fn is_queue(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Queue)
    }

    pub fn is_process(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Process)
    }

    /// True when the submission was rejected for back-pressure.
    pub fn is_queue_full(&self) -> bool {
        self.source_as::<QueueError>()
            .is_some_and(|e| matches!(e, QueueError::Full))
    }

    /// True when the submission arrived after the unit closed.
    pub fn is_closed(&self) -> bool {
        self.source_as::<QueueError>()
            .is_some_and(|e| matches!(e, QueueError::Closed))
    }

    /// True for the canonical cancellation signal.
    ///
    /// Classification of in-flight tasks keys off this predicate, so it
    /// downcasts the boxed source rather than matching display strings.
    pub fn is_cancelled(&self) -> bool {
        self.source_as::<ProcessError>()
            .is_some_and(|e| matches!(e, ProcessError::Cancelled))
    }

    fn source_as<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.source.as_ref().and_then(|s| s.downcast_ref::<E>())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("partline::Error");
        f.field("kind", &self.inner.kind);
        if let Some(ref message) = self.inner.message {
            f.field("message", message);
        }
        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }
        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref message) = self.inner.message {
            write!(f, "{} error: {}", self.inner.kind, message)?;
        } else {
            write!(f, "{} error", self.inner.kind)?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|e| &**e as &(dyn StdError + 'static))
    }
}

impl From<QueueError> for Error {
    fn from(err: QueueError) -> Self {
        Error::new(ErrorKind::Queue, Some(err))
    }
}

impl From<ProcessError> for Error {
    fn from(err: ProcessError) -> Self {
        Error::new(ErrorKind::Process, Some(err))
    }
}

/// Intake queue submission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The bounded intake queue is full; back-pressure signal to the caller.
    #[error("intake queue full")]
    Full,
    /// The unit's worker has exited; no further submissions are accepted.
    #[error("processor unit closed")]
    Closed,
}

/// Task processing errors surfaced by a pipeline.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("processing failed: {0}")]
    Failed(#[source] BoxError),
    /// Cancellation signal: the task must not be marked handled.
    #[error("processing cancelled")]
    Cancelled,
}

impl Error {
    pub fn queue_full() -> Self {
        Error::from(QueueError::Full)
    }

    pub fn unit_closed() -> Self {
        Error::from(QueueError::Closed)
    }

    pub fn cancelled() -> Self {
        Error::from(ProcessError::Cancelled)
    }

    pub fn process_failed<E: Into<BoxError>>(source: E) -> Self {
        Error::from(ProcessError::Failed(source.into()))
    }
}
