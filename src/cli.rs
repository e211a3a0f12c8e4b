//! Command-line arguments.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "demo-seeder")]
#[command(about = "Create, continuously seed, and drop a demo PostgreSQL schema")]
#[command(long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(false)
        .args(["insert", "create_tables", "drop_tables", "recreate", "validate"])
))]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(long, env = "DEMO_SEEDER_CONFIG", value_name = "PATH")]
    pub config: PathBuf,

    /// Run the configured insert workers until Ctrl+C
    #[arg(long)]
    pub insert: bool,

    /// Create tables without inserting data
    #[arg(long)]
    pub create_tables: bool,

    /// Drop all tables
    #[arg(long)]
    pub drop_tables: bool,

    /// Drop and recreate all tables, then load the fixed data set
    #[arg(long)]
    pub recreate: bool,

    /// Validate the config and the database connection
    #[arg(long)]
    pub validate: bool,

    /// Do not ask for confirmation before dropping tables
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert,
    CreateTables,
    DropTables,
    Recreate,
    Validate,
}

impl Cli {
    /// The single action selected on the command line.
    pub fn action(&self) -> Action {
        if self.insert {
            Action::Insert
        } else if self.create_tables {
            Action::CreateTables
        } else if self.drop_tables {
            Action::DropTables
        } else if self.recreate {
            Action::Recreate
        } else {
            Action::Validate
        }
    }
}
