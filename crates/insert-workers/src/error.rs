//! Error types for insert workers.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while executing an insert.
///
/// Every variant is treated as a failure of a single attempt; what happens
/// next is decided by the worker's [`ErrorPolicy`](crate::ErrorPolicy).
#[derive(Error, Debug)]
pub enum InserterError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Could not check a connection out of the pool.
    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// The statement did not complete before its deadline.
    #[error("Insert into '{table}' timed out after {timeout:?}")]
    Timeout { table: String, timeout: Duration },

    /// Any other execution failure reported by an executor.
    #[error("Execution error: {0}")]
    Execution(String),
}
