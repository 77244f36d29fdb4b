use std::sync::Arc;

use log::{error, info, warn};
use metrics::{counter, gauge};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::common::{ProcessorConfig, WorkerScope};
use crate::processor::intake::{self, IntakeQueue, RejectedTask};
use crate::processor::pipeline::{TaskOutcome, TaskPipeline};
use crate::processor::request::TaskRequest;

/// Serialized task-execution unit for one worker slot of one partition.
///
/// One dedicated worker consumes the bounded intake queue in submission order
/// and dispatches each task into the pipeline, one at a time. Processing
/// failures never propagate to submitters; they only decide whether the
/// task's completion is settled and whether the worker keeps going:
/// - failure with no shutdown requested: the task is completed anyway and the
///   worker moves on, so one bad task cannot stall its partition;
/// - failure while shutdown is requested: the task is completed but no
///   further queued task is started;
/// - cancellation while shutdown is requested: the task is left uncompleted
///   (eligible for redelivery) and no further queued task is started.
pub struct ProcessorUnit {
    scope: WorkerScope,
    intake: IntakeQueue,
    shutdown_tx: watch::Sender<bool>,
    cancel_tx: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ProcessorUnit {
    /// Creates the unit and starts its worker.
    pub fn new(
        scope: WorkerScope,
        pipeline: Arc<dyn TaskPipeline>,
        config: &ProcessorConfig,
    ) -> Self {
        let scope_label = scope.to_string();
        let (intake, rx) = intake::intake(config.effective_capacity(), scope_label.clone());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let worker = WorkerLoop {
            scope: scope.clone(),
            rx,
            pipeline,
            shutdown_rx,
            cancel_rx,
        };
        let span = tracing::info_span!("worker_loop", scope = %scope_label);
        let handle = tokio::spawn(worker.run().instrument(span));

        Self {
            scope,
            intake,
            shutdown_tx,
            cancel_tx,
            worker: Mutex::new(Some(handle)),
        }
    }

    /// Scope identity of this unit.
    pub fn scope(&self) -> &WorkerScope {
        &self.scope
    }

    /// Enqueues a task for processing.
    ///
    /// Rejections hand the task back: `QueueError::Full` is the back-pressure
    /// signal, `QueueError::Closed` means the worker has already exited.
    /// Safe to call concurrently with the worker and after shutdown has been
    /// initiated; tasks queued before the worker observes an empty queue are
    /// still drained.
    pub fn submit(&self, task: TaskRequest) -> Result<(), RejectedTask> {
        self.intake.offer(task)
    }

    /// Requests shutdown. Idempotent, returns immediately.
    ///
    /// Only flips the flag: queued tasks keep draining and an in-flight
    /// pipeline call is left undisturbed. The flag is read again at every
    /// failure classification, so a shutdown triggered from inside the
    /// pipeline is observed by the very task that triggered it.
    pub fn initiate_shutdown(&self) {
        let was_set = self.shutdown_tx.send_replace(true);
        if !was_set {
            info!("Shutdown initiated for processor unit {}", self.scope);
        }
    }

    /// Shuts down and waits for the worker to exit.
    ///
    /// Preempts a worker stuck in a suspension point (idle queue wait, or a
    /// deferred completion future that never resolves); a preempted in-flight
    /// task classifies as cancelled and stays uncompleted. Owners that want a
    /// graceful drain call [`ProcessorUnit::initiate_shutdown`] first and
    /// `close` once their pipelines are quiescent. Idempotent; concurrent
    /// callers all block until the worker has exited.
    pub async fn close(&self) {
        self.initiate_shutdown();
        let mut worker = self.worker.lock().await;
        if let Some(handle) = worker.take() {
            self.cancel_tx.send_replace(true);
            if let Err(e) = handle.await {
                error!("Worker for processor unit {} panicked: {}", self.scope, e);
            }
        }
    }
}

/// Decision taken after one task has been classified.
enum LoopAction {
    Continue,
    Abort,
}

struct WorkerLoop {
    scope: WorkerScope,
    rx: mpsc::Receiver<TaskRequest>,
    pipeline: Arc<dyn TaskPipeline>,
    shutdown_rx: watch::Receiver<bool>,
    cancel_rx: watch::Receiver<bool>,
}

impl WorkerLoop {
    async fn run(mut self) {
        info!("Worker started for processor unit {}", self.scope);
        let scope_label = self.scope.to_string();
        let topic = self.scope.topic().to_string();
        let mut shutdown_wait = self.shutdown_rx.clone();

        loop {
            if *self.cancel_rx.borrow() {
                break;
            }

            let task = if *self.shutdown_rx.borrow() {
                // Drain what was queued before shutdown, then stop.
                match self.rx.try_recv() {
                    Ok(task) => task,
                    Err(_) => break,
                }
            } else {
                tokio::select! {
                    biased;
                    task = self.rx.recv() => match task {
                        Some(task) => task,
                        // All senders dropped; nothing more can arrive.
                        None => break,
                    },
                    _ = shutdown_wait.wait_for(|s| *s) => continue,
                }
            };

            gauge!("processor_queued_tasks", "scope" => scope_label.clone()).decrement(1.0);

            let outcome = self.dispatch(&task).await;
            counter!(
                "processor_tasks_total",
                "topic" => topic.clone(),
                "outcome" => outcome.label()
            )
            .increment(1);

            match self.settle(task, outcome) {
                LoopAction::Continue => {}
                LoopAction::Abort => {
                    counter!("processor_unit_aborts_total", "topic" => topic.clone()).increment(1);
                    break;
                }
            }
        }

        // Tasks still queued at abort are dropped unhandled; their completion
        // handles signal not-handled to the poller.
        let mut dropped = 0usize;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            gauge!("processor_queued_tasks", "scope" => scope_label.clone())
                .decrement(dropped as f64);
            warn!(
                "Dropped {} queued tasks on abort of processor unit {}",
                dropped, self.scope
            );
        }

        info!("Worker stopped for processor unit {}", self.scope);
    }

    /// Runs one task through the pipeline, racing the unit's cancel signal.
    ///
    /// Biased toward the pipeline side so an already-resolved completion
    /// future always classifies as completed even when the cancel signal is
    /// simultaneously set.
    async fn dispatch(&self, task: &TaskRequest) -> TaskOutcome {
        let mut cancel_rx = self.cancel_rx.clone();
        tokio::select! {
            biased;
            outcome = Self::run_pipeline(&self.pipeline, task) => outcome,
            _ = cancel_rx.wait_for(|c| *c) => TaskOutcome::Cancelled,
        }
    }

    async fn run_pipeline(pipeline: &Arc<dyn TaskPipeline>, task: &TaskRequest) -> TaskOutcome {
        let completion_future = match pipeline.process(task).await {
            Ok(fut) => fut,
            Err(e) => return TaskOutcome::from_result(Err(e)),
        };
        TaskOutcome::from_result(completion_future.await)
    }

    /// Applies the shutdown-aware completion rules for one classified task.
    fn settle(&self, task: TaskRequest, outcome: TaskOutcome) -> LoopAction {
        match outcome {
            TaskOutcome::Completed => {
                task.complete();
                LoopAction::Continue
            }
            TaskOutcome::Failed(e) => {
                // Read the flag at error-handling time, not dequeue time: the
                // pipeline may have initiated shutdown while this task was in
                // flight.
                if *self.shutdown_rx.borrow() {
                    warn!(
                        "Task {} failed during shutdown, aborting unit {}: {}",
                        task.id(),
                        self.scope,
                        e
                    );
                    task.complete();
                    LoopAction::Abort
                } else {
                    error!("Uncaught failure processing task {}: {}", task.id(), e);
                    task.complete();
                    LoopAction::Continue
                }
            }
            TaskOutcome::Cancelled => {
                if !*self.shutdown_rx.borrow() {
                    warn!(
                        "Task {} cancelled without shutdown request on unit {}",
                        task.id(),
                        self.scope
                    );
                }
                // No completion: the task stays eligible for redelivery.
                LoopAction::Abort
            }
        }
    }
}
