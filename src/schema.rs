//! Embedded SQL files and the table drop list.

use anyhow::Context;
use deadpool_postgres::Pool;
use insert_workers::generate_drop_table;
use tracing::info;

/// A SQL script compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlFile {
    pub name: &'static str,
    pub contents: &'static str,
}

pub const CREATE_TABLES: SqlFile = SqlFile {
    name: "00-create-tables.sql",
    contents: include_str!("../sql/00-create-tables.sql"),
};

pub const INSERT_DATA: SqlFile = SqlFile {
    name: "01-insert-data.sql",
    contents: include_str!("../sql/01-insert-data.sql"),
};

/// Every table the demo schema creates, dependents first.
pub const DROP_TABLES: &[&str] = &[
    "playlist_track",
    "track",
    "album",
    "artist",
    "genre",
    "media_type",
    "playlist",
    "customer",
    "employee",
    "timestamp",
    "bigtable",
];

/// Run each file as one multi-statement batch, stopping at the first failure.
pub async fn execute_sql_files(pool: &Pool, files: &[SqlFile]) -> anyhow::Result<()> {
    let client = pool.get().await.context("Failed to get a connection")?;
    for file in files {
        client
            .batch_execute(file.contents)
            .await
            .with_context(|| format!("Error executing SQL file {}", file.name))?;
        info!("Executed SQL file {} successfully", file.name);
    }
    Ok(())
}

/// Drop every table in [`DROP_TABLES`] inside one transaction.
pub async fn drop_tables(pool: &Pool) -> anyhow::Result<()> {
    let mut client = pool.get().await.context("Failed to get a connection")?;
    let transaction = client.transaction().await?;
    for table in DROP_TABLES {
        transaction
            .batch_execute(&generate_drop_table(table))
            .await
            .with_context(|| format!("Dropping table {table} failed"))?;
        info!("Dropped table {} (if existed)", table);
    }
    transaction.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insert_workers::{BIGTABLE_TABLES, MAIN_TABLES, TIMESTAMP_TABLES};

    #[test]
    fn test_seeded_tables_are_created_and_dropped() {
        let seeded = TIMESTAMP_TABLES
            .iter()
            .chain(BIGTABLE_TABLES)
            .chain(MAIN_TABLES);
        for table in seeded {
            assert!(
                CREATE_TABLES
                    .contents
                    .contains(&format!("CREATE TABLE IF NOT EXISTS \"{}\"", table.name)),
                "{} is not created",
                table.name
            );
            assert!(DROP_TABLES.contains(&table.name), "{} is not dropped", table.name);
        }
    }

    #[test]
    fn test_every_created_table_is_dropped() {
        let created = CREATE_TABLES
            .contents
            .matches("CREATE TABLE IF NOT EXISTS")
            .count();
        assert_eq!(created, DROP_TABLES.len());
    }
}
