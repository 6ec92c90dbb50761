//! Read access to the CE order store.
//!
//! The store is owned by another system; this crate only reads from it.
//! [`store::OrderStore`] wraps an [`source::OrderSource`] with a short-lived
//! query cache that the dashboard can invalidate on demand.

use sqlx::postgres::PgPoolOptions;

pub mod cache;
pub mod models;
pub mod repositories;
pub mod source;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// The dashboard issues one query per load, so a small pool is enough.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
