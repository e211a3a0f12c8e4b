//! An in-memory executor that records every insert.

use crate::error::InserterError;
use crate::executor::StatementExecutor;
use crate::insert::InsertStatement;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Default)]
pub(crate) struct RecordingExecutor {
    inserts: Mutex<Vec<(String, Instant)>>,
    last_timeout: Mutex<Option<Duration>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    latency: Duration,
}

impl RecordingExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every insert into `table` fails.
    pub(crate) fn failing(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }

    /// Every insert into `table` panics inside the worker task.
    pub(crate) fn panicking(mut self, table: &str) -> Self {
        self.panicking.insert(table.to_string());
        self
    }

    /// Simulated round-trip time per insert.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Successful inserts into `table`.
    pub(crate) fn count(&self, table: &str) -> u64 {
        self.times(table).len() as u64
    }

    /// Completion times of successful inserts into `table`, in order.
    pub(crate) fn times(&self, table: &str) -> Vec<Instant> {
        self.inserts
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, at)| *at)
            .collect()
    }

    pub(crate) fn last_timeout(&self) -> Option<Duration> {
        *self.last_timeout.lock().unwrap()
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute(
        &self,
        statement: &InsertStatement,
        deadline: Duration,
    ) -> Result<u64, InserterError> {
        *self.last_timeout.lock().unwrap() = Some(deadline);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.panicking.contains(&statement.table) {
            panic!("executor panicked on {}", statement.table);
        }
        if self.failing.contains(&statement.table) {
            return Err(InserterError::Execution(format!(
                "forced failure for {}",
                statement.table
            )));
        }

        self.inserts
            .lock()
            .unwrap()
            .push((statement.table.clone(), Instant::now()));
        Ok(1)
    }
}
