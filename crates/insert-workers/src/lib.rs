//! Concurrent periodic insert workers for demo-seeder.
//!
//! This crate launches one worker per seeded table, each inserting synthetic
//! rows on its own cadence against a shared connection pool, and stops them
//! all through a single cancellation token.
//!
//! # Overview
//!
//! - [`InsertTask`] inserts one row into one table from a [`TableDescriptor`].
//! - [`InsertWorker`] repeats a task, either back-to-back or waiting a fixed
//!   interval after every completed insert.
//! - [`WorkerSupervisor`] turns an [`InserterConfiguration`] into workers and
//!   waits for all of them to stop.
//!
//! The database is reached through the [`StatementExecutor`] trait, which is
//! implemented for `deadpool_postgres::Pool`.
//!
//! # Example
//!
//! ```ignore
//! use insert_workers::{CategoryConfig, InsertCategory, InserterConfiguration, WorkerSupervisor};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = InserterConfiguration::default()
//!     .with(InsertCategory::MainTables, CategoryConfig::enabled(0));
//! let cancel = CancellationToken::new();
//!
//! let report = WorkerSupervisor::new(Arc::new(pool)).run(&config, &cancel).await;
//! println!("{} rows inserted", report.total_executions());
//! ```

mod config;
mod error;
mod executor;
mod insert;
mod supervisor;
mod worker;

#[cfg(test)]
mod test_support;

pub use config::{
    CategoryConfig, InsertCategory, InserterConfiguration, MainTablesConfig, MainTablesMode,
    MIN_RETRY_DELAY,
};
pub use error::InserterError;
pub use executor::StatementExecutor;
pub use insert::{
    generate_drop_table, Column, ColumnValue, InsertStatement, InsertTask, TableDescriptor,
    BIGTABLE_TABLES, DEFAULT_STATEMENT_TIMEOUT, MAIN_TABLES, TIMESTAMP_TABLES,
};
pub use supervisor::{worker_descriptors, SupervisorReport, WorkerSupervisor};
pub use worker::{
    ErrorPolicy, InsertWorker, StopReason, WorkerDescriptor, WorkerReport, WorkerState,
};
