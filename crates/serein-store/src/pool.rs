use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::StoreError;

/// Migrations embedded from `migrations/` at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Connect to PostgreSQL and bring the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!("database schema up to date");

    Ok(pool)
}
