use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;

/// Schema migrations embedded from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations(db: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR
        .run(db)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
