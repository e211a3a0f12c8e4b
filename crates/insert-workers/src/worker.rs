//! A single periodic insert loop.
//!
//! A worker moves through [`WorkerState`]s:
//!
//! ```text
//! Idle -> Running -> (Waiting -> Running)* -> Stopped
//! ```
//!
//! It stops when the cancellation token fires (checked before every insert
//! and raced against every wait) or when an insert fails under
//! [`ErrorPolicy::Stop`]. An insert that is already in flight is never
//! aborted; it finishes or runs into its own deadline first.

use crate::executor::StatementExecutor;
use crate::insert::{InsertTask, TableDescriptor};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What a worker does after a failed insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the error and stop this worker.
    Stop,
    /// Log the error, wait, then try again.
    RetryAfter(Duration),
}

/// Everything needed to launch one worker.
#[derive(Debug, Clone)]
pub struct WorkerDescriptor {
    pub table: TableDescriptor,
    /// Wait after each completed insert; `None` runs back-to-back.
    pub interval: Option<Duration>,
    pub on_error: ErrorPolicy,
}

impl WorkerDescriptor {
    pub fn new(table: TableDescriptor, interval: Option<Duration>) -> Self {
        Self {
            table,
            interval: interval.filter(|d| !d.is_zero()),
            on_error: ErrorPolicy::Stop,
        }
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn table_name(&self) -> &'static str {
        self.table.name
    }

    pub fn payload_shape(&self) -> Vec<usize> {
        self.table.payload_shape()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
    Waiting,
    Stopped,
}

/// Why a worker reached [`WorkerState::Stopped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    Failed(String),
}

/// Outcome of one worker run.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub table: String,
    /// Successful inserts.
    pub executions: u64,
    /// Failed inserts, including retried ones.
    pub failures: u64,
    pub reason: StopReason,
    pub elapsed: Duration,
}

impl WorkerReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.reason, StopReason::Failed(_))
    }
}

/// Repeats one [`InsertTask`] on a cadence until stopped.
pub struct InsertWorker {
    descriptor: WorkerDescriptor,
    task: InsertTask,
    executor: Arc<dyn StatementExecutor>,
    cancel: CancellationToken,
    state: watch::Sender<WorkerState>,
    executions: u64,
    failures: u64,
}

impl InsertWorker {
    pub fn new(
        descriptor: WorkerDescriptor,
        executor: Arc<dyn StatementExecutor>,
        cancel: CancellationToken,
    ) -> Self {
        let task = InsertTask::new(descriptor.table);
        let (state, _) = watch::channel(WorkerState::Idle);
        Self {
            descriptor,
            task,
            executor,
            cancel,
            state,
            executions: 0,
            failures: 0,
        }
    }

    /// Replace the task, e.g. to change the statement deadline.
    pub fn with_task(mut self, task: InsertTask) -> Self {
        self.task = task;
        self
    }

    /// Watch the worker's state transitions.
    pub fn subscribe(&self) -> watch::Receiver<WorkerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// Run until cancelled or until an insert fails under [`ErrorPolicy::Stop`].
    pub async fn run(mut self) -> WorkerReport {
        let started = Instant::now();
        let table = self.descriptor.table_name();

        self.state.send_replace(WorkerState::Running);
        match self.descriptor.interval {
            Some(interval) => info!(table, ?interval, "Starting insert worker"),
            None => info!(table, "Starting insert worker (no delay between inserts)"),
        }

        let reason = loop {
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            match self.task.execute(self.executor.as_ref()).await {
                Ok(_) => {
                    self.executions += 1;
                    debug!(table, executions = self.executions, "Insert complete");
                }
                Err(e) => {
                    self.failures += 1;
                    match self.descriptor.on_error {
                        ErrorPolicy::Stop => {
                            error!(table, error = %e, "Insert failed, stopping worker");
                            break StopReason::Failed(e.to_string());
                        }
                        ErrorPolicy::RetryAfter(delay) => {
                            warn!(table, error = %e, ?delay, "Insert failed, will retry");
                            if !self.wait(delay).await {
                                break StopReason::Cancelled;
                            }
                            continue;
                        }
                    }
                }
            }

            match self.descriptor.interval {
                Some(interval) => {
                    if !self.wait(interval).await {
                        break StopReason::Cancelled;
                    }
                }
                // No injected delay, but let sibling tasks run.
                None => tokio::task::yield_now().await,
            }
        };

        self.state.send_replace(WorkerState::Stopped);
        info!(
            table,
            executions = self.executions,
            failures = self.failures,
            "Insert worker stopped"
        );

        WorkerReport {
            table: table.to_string(),
            executions: self.executions,
            failures: self.failures,
            reason,
            elapsed: started.elapsed(),
        }
    }

    /// Wait for `duration` unless cancelled first. Returns `false` on cancellation.
    async fn wait(&mut self, duration: Duration) -> bool {
        self.state.send_replace(WorkerState::Waiting);
        let elapsed = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        };
        if elapsed {
            self.state.send_replace(WorkerState::Running);
        }
        elapsed
    }
}
