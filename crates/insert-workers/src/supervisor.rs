//! Launches the configured insert workers and waits for all of them.

use crate::config::InserterConfiguration;
use crate::executor::StatementExecutor;
use crate::insert::{InsertTask, DEFAULT_STATEMENT_TIMEOUT};
use crate::worker::{InsertWorker, StopReason, WorkerDescriptor, WorkerReport};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// One descriptor per table of every enabled category.
pub fn worker_descriptors(config: &InserterConfiguration) -> Vec<WorkerDescriptor> {
    config
        .enabled_categories()
        .into_iter()
        .flat_map(|category| {
            let settings = config.category(category);
            category.tables().iter().map(move |table| {
                WorkerDescriptor::new(*table, settings.interval())
                    .with_error_policy(settings.error_policy())
            })
        })
        .collect()
}

/// Results of a supervised run.
#[derive(Debug, Clone, Default)]
pub struct SupervisorReport {
    pub workers: Vec<WorkerReport>,
    pub total_duration: Duration,
}

impl SupervisorReport {
    pub fn total_executions(&self) -> u64 {
        self.workers.iter().map(|w| w.executions).sum()
    }

    pub fn failed(&self) -> impl Iterator<Item = &WorkerReport> {
        self.workers.iter().filter(|w| w.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn worker(&self, table: &str) -> Option<&WorkerReport> {
        self.workers.iter().find(|w| w.table == table)
    }
}

/// Runs one [`InsertWorker`] per enabled table against a shared executor.
pub struct WorkerSupervisor {
    executor: Arc<dyn StatementExecutor>,
    statement_timeout: Duration,
}

impl WorkerSupervisor {
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self {
            executor,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }

    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = timeout;
        self
    }

    /// Launch every enabled worker and block until all have stopped.
    ///
    /// This never fails: workers that stop on error are reported, and the
    /// caller decides what that means for the process.
    pub async fn run(
        &self,
        config: &InserterConfiguration,
        cancel: &CancellationToken,
    ) -> SupervisorReport {
        let started = Instant::now();
        let descriptors = worker_descriptors(config);
        if descriptors.is_empty() {
            info!("No insert categories enabled, nothing to do");
            return SupervisorReport::default();
        }

        info!("Launching {} insert workers", descriptors.len());

        let mut tables = Vec::with_capacity(descriptors.len());
        let mut handles = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let task = InsertTask::new(descriptor.table).with_timeout(self.statement_timeout);
            tables.push(descriptor.table_name());
            let worker = InsertWorker::new(descriptor, self.executor.clone(), cancel.clone())
                .with_task(task);
            handles.push(tokio::spawn(worker.run()));
        }

        let workers = join_all(handles)
            .await
            .into_iter()
            .zip(tables)
            .map(|(joined, table)| match joined {
                Ok(report) => report,
                Err(e) => {
                    error!(table, error = %e, "Insert worker task ended abnormally");
                    WorkerReport {
                        table: table.to_string(),
                        executions: 0,
                        failures: 0,
                        reason: StopReason::Failed(e.to_string()),
                        elapsed: started.elapsed(),
                    }
                }
            })
            .collect();

        let report = SupervisorReport {
            workers,
            total_duration: started.elapsed(),
        };
        info!(
            "All insert workers stopped: {} inserts in {:?}",
            report.total_executions(),
            report.total_duration
        );
        report
    }
}
