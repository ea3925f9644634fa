//! # User Management DB
//!
//! Database pool and helpers for the User Management API.
//!
//! The store is SQLite accessed through SQLx. Foreign keys are switched on
//! for every connection so `ON DELETE CASCADE` on the join tables holds.
//!
//! # Example
//!
//! ```ignore
//! use usermanager_config::DatabaseConfig;
//! use usermanager_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     Ok(())
//! }
//! ```

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use usermanager_config::DatabaseConfig;

// Re-export SqlitePool for convenience
pub use sqlx::SqlitePool;

fn connect_options(url: &str) -> anyhow::Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database URL: {}", url))?
        .create_if_missing(true)
        .foreign_keys(true);
    Ok(options)
}

/// Opens a connection pool.
///
/// This should be called once during startup; the returned pool is cheaply
/// cloneable and is handed to every repository.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = connect_options(&config.url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections = config.max_connections, "Database pool initialized");
    Ok(pool)
}

/// Builds a pool that only connects on first use.
pub fn init_lazy_pool(config: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = connect_options(&config.url)?;
    Ok(SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(options))
}

/// True when `err` is a UNIQUE or PRIMARY KEY constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
