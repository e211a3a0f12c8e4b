//! Single-row INSERT logic and the declarative table catalog.

use crate::error::InserterError;
use crate::executor::StatementExecutor;
use std::time::Duration;

/// Default deadline for one INSERT round-trip.
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// How a column gets its value on every insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue {
    /// A fresh random alphanumeric string of the given length, bound as a parameter.
    Random { length: usize },
    /// A SQL expression inlined into the statement, e.g. `NOW()`.
    Expression(&'static str),
}

/// One column of a seeded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub value: ColumnValue,
}

impl Column {
    pub const fn random(name: &'static str, length: usize) -> Self {
        Self {
            name,
            value: ColumnValue::Random { length },
        }
    }

    pub const fn expression(name: &'static str, sql: &'static str) -> Self {
        Self {
            name,
            value: ColumnValue::Expression(sql),
        }
    }
}

/// A table the workers know how to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableDescriptor {
    pub const fn new(name: &'static str, columns: &'static [Column]) -> Self {
        Self { name, columns }
    }

    /// Lengths of the random columns, in column order.
    pub fn payload_shape(&self) -> Vec<usize> {
        self.columns
            .iter()
            .filter_map(|c| match c.value {
                ColumnValue::Random { length } => Some(length),
                ColumnValue::Expression(_) => None,
            })
            .collect()
    }

    /// The parameterized INSERT statement for this table.
    ///
    /// Random columns become positional placeholders (`$1`, `$2`, ...) in
    /// the order they appear; expression columns are inlined.
    pub fn insert_sql(&self) -> String {
        let mut param_idx = 0;
        let values: Vec<String> = self
            .columns
            .iter()
            .map(|c| match c.value {
                ColumnValue::Random { .. } => {
                    param_idx += 1;
                    format!("${param_idx}")
                }
                ColumnValue::Expression(sql) => sql.to_string(),
            })
            .collect();

        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            self.name,
            self.columns
                .iter()
                .map(|c| format!("\"{}\"", c.name))
                .collect::<Vec<_>>()
                .join(", "),
            values.join(", ")
        )
    }
}

/// The `timestamp` category: one row stamped by the server clock.
pub const TIMESTAMP_TABLES: &[TableDescriptor] = &[TableDescriptor::new(
    "timestamp",
    &[Column::expression("created_at", "NOW()")],
)];

/// The `bigtable` category: five wide text columns.
pub const BIGTABLE_TABLES: &[TableDescriptor] = &[TableDescriptor::new(
    "bigtable",
    &[
        Column::random("cola", 120),
        Column::random("colb", 120),
        Column::random("colc", 120),
        Column::random("cold", 120),
        Column::random("cole", 120),
    ],
)];

/// The `main-tables` category: one worker per table below.
pub const MAIN_TABLES: &[TableDescriptor] = &[
    TableDescriptor::new("artist", &[Column::random("name", 20)]),
    TableDescriptor::new("genre", &[Column::random("name", 120)]),
    TableDescriptor::new("media_type", &[Column::random("name", 120)]),
    TableDescriptor::new("playlist", &[Column::random("name", 120)]),
    TableDescriptor::new(
        "employee",
        &[
            Column::random("last_name", 20),
            Column::random("first_name", 20),
            Column::random("title", 20),
            Column::random("address", 60),
            Column::random("city", 40),
            Column::random("state", 40),
            Column::random("country", 40),
            Column::random("phone", 20),
            Column::random("fax", 20),
            Column::random("email", 60),
        ],
    ),
];

/// A fully bound INSERT, ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub table: String,
    pub sql: String,
    pub params: Vec<String>,
}

impl InsertStatement {
    /// Bind fresh random payload values for every random column of `table`.
    pub fn for_table(table: &TableDescriptor) -> Self {
        Self {
            table: table.name.to_string(),
            sql: table.insert_sql(),
            params: payload_generator::generate_row(&table.payload_shape()),
        }
    }
}

/// One idempotent unit of work: insert a single synthetic row into one table.
#[derive(Debug, Clone, Copy)]
pub struct InsertTask {
    table: TableDescriptor,
    timeout: Duration,
}

impl InsertTask {
    pub fn new(table: TableDescriptor) -> Self {
        Self {
            table,
            timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }

    /// Set the per-statement deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn table(&self) -> &TableDescriptor {
        &self.table
    }

    /// Insert one row. No retry happens here.
    pub async fn execute(&self, executor: &dyn StatementExecutor) -> Result<u64, InserterError> {
        let statement = InsertStatement::for_table(&self.table);
        executor.execute(&statement, self.timeout).await
    }
}

/// Generate a DROP TABLE statement.
pub fn generate_drop_table(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS \"{table_name}\" CASCADE")
}
