//! The connection seam between workers and the database.

use crate::error::InserterError;
use crate::insert::InsertStatement;
use async_trait::async_trait;
use std::time::Duration;
use tokio_postgres::types::ToSql;

/// Anything that can run a parameterized statement under a deadline.
///
/// Implementations must be safe to share between workers; the workers never
/// lock around calls.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute `statement`, giving up after `deadline`.
    ///
    /// Returns the number of rows affected.
    async fn execute(
        &self,
        statement: &InsertStatement,
        deadline: Duration,
    ) -> Result<u64, InserterError>;
}

#[async_trait]
impl StatementExecutor for deadpool_postgres::Pool {
    async fn execute(
        &self,
        statement: &InsertStatement,
        deadline: Duration,
    ) -> Result<u64, InserterError> {
        // Waiting for a free pooled connection counts against the deadline too.
        let work = async {
            let client = self.get().await?;
            let params: Vec<&(dyn ToSql + Sync)> = statement
                .params
                .iter()
                .map(|p| p as &(dyn ToSql + Sync))
                .collect();
            let rows = client.execute(statement.sql.as_str(), &params).await?;
            Ok::<u64, InserterError>(rows)
        };

        tokio::time::timeout(deadline, work)
            .await
            .map_err(|_| InserterError::Timeout {
                table: statement.table.clone(),
                timeout: deadline,
            })?
    }
}
