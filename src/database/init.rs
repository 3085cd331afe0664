//! Pool construction and schema bootstrap.

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

/// A type alias for the database connection pool (`Pool<Postgres>`).
pub type DbPool = Pool<Postgres>;

/// Opens the pool. Every query checks a connection out and hands it back
/// when the query future completes, on success and failure alike.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(cfg.connect_options())
        .await
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
