//! Destination store access: PostgreSQL pool construction, upsert statement
//! serialization, and the concurrent batched writer.

mod statement;
mod writer;

pub use statement::{batch_statements, build_stores_upsert, quote_literal};
pub use writer::StoreWriter;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use storesync_core::DbConfig;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("batch write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Connect to the destination Postgres pool with the configured sizing.
///
/// The returned pool manages its connections internally and is safe to share
/// across concurrent batch-writer tasks by cloning the handle.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the connection cannot be established.
pub async fn connect_pool(config: &DbConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
