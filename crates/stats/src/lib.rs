//! Statistics service: records request hits from the main service and
//! serves aggregated view counts back to it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod router;
pub mod routes;
pub mod state;

/// Connection pool type used throughout the service.
pub type DbPool = sqlx::PgPool;

/// Embedded migrations, shared by the binary and the test harness.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
