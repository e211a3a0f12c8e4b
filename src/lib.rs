//! demo-seeder library
//!
//! Provisions a demo PostgreSQL schema and keeps it busy with synthetic
//! inserts.
//!
//! # Features
//!
//! - Create, recreate, and drop the demo tables from embedded SQL files
//! - Continuous inserts from concurrent workers, one per table, each on its
//!   own cadence (see the `insert_workers` crate)
//! - Connection validation
//!
//! # CLI Usage
//!
//! ```bash
//! # Check the config and that the database answers
//! demo-seeder --config config.json --validate
//!
//! # Create the tables and load the fixed data set
//! demo-seeder --config config.json --recreate --yes
//!
//! # Insert until Ctrl+C
//! demo-seeder --config config.json --insert
//! ```

pub mod cli;
pub mod config;
pub mod connect;
pub mod prompt;
pub mod schema;

pub use cli::{Action, Cli};
pub use config::Config;
