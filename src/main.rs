//! Command-line interface for demo-seeder
//!
//! # Usage Examples
//!
//! ```bash
//! # Validate config and connectivity
//! demo-seeder --config config.json --validate
//!
//! # Create tables only
//! demo-seeder --config config.json --create-tables
//!
//! # Drop everything, recreate, and load the fixed data set
//! demo-seeder --config config.json --recreate
//!
//! # Run the enabled insert workers until Ctrl+C
//! RUST_LOG=debug demo-seeder --config config.json --insert
//! ```

use anyhow::Context;
use clap::Parser;
use deadpool_postgres::Pool;
use demo_seeder::connect::connect_pool;
use demo_seeder::prompt::confirm;
use demo_seeder::schema::{self, CREATE_TABLES, INSERT_DATA};
use demo_seeder::{Action, Cli, Config};
use insert_workers::WorkerSupervisor;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = Config::from_file(&cli.config).context("Error loading config")?;
    info!("Config loaded from {:?}", cli.config);

    let pool = connect_pool(&config)
        .await
        .context("Database connection failed")?;

    match cli.action() {
        Action::Validate => {
            println!("validation successful: config is valid and database connection established.");
        }
        Action::Insert => run_insert(&config, pool).await?,
        Action::DropTables => {
            if !cli.yes && !ask("Are you sure you want to drop all tables?")? {
                println!("Aborted. No tables were dropped.");
                return Ok(());
            }
            info!("Dropping all tables...");
            schema::drop_tables(&pool)
                .await
                .context("Error while dropping tables")?;
        }
        Action::Recreate => {
            if !cli.yes && !ask("Are you sure you want to drop and recreate all tables?")? {
                println!("Aborted. No tables were dropped.");
                return Ok(());
            }
            info!("Recreating all tables...");
            schema::drop_tables(&pool)
                .await
                .context("Error while recreating tables")?;
            schema::execute_sql_files(&pool, &[CREATE_TABLES, INSERT_DATA])
                .await
                .context("Error while recreating tables")?;
            info!("Recreation completed successfully");
        }
        Action::CreateTables => {
            info!("Creating tables without inserting data...");
            schema::execute_sql_files(&pool, &[CREATE_TABLES])
                .await
                .context("Error while creating tables")?;
            info!("Tables created successfully");
        }
    }

    Ok(())
}

fn ask(question: &str) -> anyhow::Result<bool> {
    confirm(question, std::io::stdin().lock(), std::io::stdout())
        .context("Failed to read confirmation")
}

async fn run_insert(config: &Config, pool: Pool) -> anyhow::Result<()> {
    let categories = config.inserter.enabled_categories();
    if categories.is_empty() {
        warn!("No insert categories are enabled in the config");
    }
    for category in &categories {
        match config.inserter.category(*category).interval() {
            Some(interval) => info!("Category '{}' enabled, every {:?}", category, interval),
            None => info!("Category '{}' enabled, no delay between inserts", category),
        }
    }

    let cancel = CancellationToken::new();
    setup_shutdown_handler(cancel.clone());
    info!("Running inserts... Press Ctrl+C to stop.");

    let report = WorkerSupervisor::new(Arc::new(pool))
        .run(&config.inserter, &cancel)
        .await;

    for worker in &report.workers {
        info!(
            "{}: {} rows inserted, {} failed attempts, stopped after {:?} ({:?})",
            worker.table, worker.executions, worker.failures, worker.elapsed, worker.reason
        );
    }

    let failed = report.failed().count();
    if failed > 0 {
        anyhow::bail!(
            "{} of {} insert workers stopped on error",
            failed,
            report.workers.len()
        );
    }
    Ok(())
}

/// Cancels `cancel` on the first Ctrl+C.
fn setup_shutdown_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received interrupt signal (Ctrl+C), stopping insert workers");
                cancel.cancel();
            }
            Err(e) => error!("Failed to install Ctrl+C handler: {}", e),
        }
    });
}
