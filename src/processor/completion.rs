use tokio::sync::watch;

/// Single-assignment completion signal owned by one task.
///
/// `complete` transitions pending -> done at most once; repeated calls are
/// no-ops. Dropping the handle without completing resolves the watcher with
/// the task still pending, which observers must treat as not handled and
/// eligible for redelivery.
pub struct CompletionHandle {
    tx: watch::Sender<bool>,
}

/// Observer half of a [`CompletionHandle`].
pub struct CompletionWatcher {
    rx: watch::Receiver<bool>,
}

impl CompletionHandle {
    pub fn new() -> (CompletionHandle, CompletionWatcher) {
        let (tx, rx) = watch::channel(false);
        (CompletionHandle { tx }, CompletionWatcher { rx })
    }

    /// Marks the task as handled. Idempotent.
    pub fn complete(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_complete(&self) -> bool {
        *self.tx.borrow()
    }
}

impl CompletionWatcher {
    /// Waits until the task completes or its handle is dropped uncompleted.
    /// Check [`CompletionWatcher::is_complete`] afterwards to tell the two
    /// apart.
    pub async fn done(&mut self) {
        let _ = self.rx.wait_for(|done| *done).await;
    }

    pub fn is_complete(&self) -> bool {
        *self.rx.borrow()
    }
}
