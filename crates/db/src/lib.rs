//! Storage layer for the icon library service.
//!
//! [`store`] defines the storage seam ([`IconStore`], [`CredentialStore`])
//! with a PostgreSQL implementation and an in-memory one. The helpers below
//! manage the PostgreSQL pool and its schema.

pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use store::{CredentialStore, IconStore, MemoryStore, PgStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
