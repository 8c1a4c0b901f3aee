//! Database access layer: pool construction, migrations, row models, and
//! the GPS ping repository.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod filter;
pub mod models;
pub mod repositories;

pub use repositories::GpsRepo;

pub type DbPool = sqlx::PgPool;

/// Create a bounded connection pool from a database URL.
///
/// The pool is the only shared mutable resource in this service; every
/// aggregate competes for the same small set of connections, and acquisition
/// beyond `acquire_timeout` surfaces as a connection-timeout error rather
/// than waiting indefinitely.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
