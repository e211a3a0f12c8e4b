use crate::config::Config;
use anyhow::Context;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use std::time::Duration;
use tokio_postgres::NoTls;

/// Upper bound on concurrent connections; extra requests queue inside the pool.
pub const POOL_MAX_SIZE: usize = 5;
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub fn pg_config(config: &Config) -> tokio_postgres::Config {
    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host)
        .port(config.port)
        .dbname(&config.database)
        .user(&config.username)
        .connect_timeout(CONNECT_TIMEOUT);
    if !config.password.is_empty() {
        pg.password(&config.password);
    }
    pg
}

pub fn build_pool(config: &Config) -> anyhow::Result<Pool> {
    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config(config), NoTls, mgr_config);
    Pool::builder(mgr)
        .max_size(POOL_MAX_SIZE)
        .build()
        .context("Failed to build connection pool")
}

/// Check out a connection and run `SELECT 1`.
pub async fn health_check(pool: &Pool) -> anyhow::Result<()> {
    let check = async {
        let client = pool.get().await.context("Failed to get a connection")?;
        client
            .simple_query("SELECT 1")
            .await
            .context("Health check query failed")?;
        anyhow::Ok(())
    };
    tokio::time::timeout(HEALTH_CHECK_TIMEOUT, check)
        .await
        .with_context(|| format!("Health check timed out after {HEALTH_CHECK_TIMEOUT:?}"))?
}

// Build the pool and make sure the database answers before anything else runs.
pub async fn connect_pool(config: &Config) -> anyhow::Result<Pool> {
    tracing::info!("Connecting to {}", config.masked_target());
    let pool = build_pool(config)?;
    health_check(&pool).await?;
    Ok(pool)
}
