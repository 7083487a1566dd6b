//! Concurrent batched writer for the stores table.

use sqlx::PgPool;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use storesync_core::{DbConfig, Store};

use crate::statement::batch_statements;
use crate::DbError;

const DEFAULT_BATCH_SIZE: usize = 500;

/// Writes canonical stores to the destination table in concurrent batches.
///
/// Holds a cloned [`PgPool`] handle; the pool's internal connection
/// management makes the writer safe to drive from multiple batch tasks at
/// once.
pub struct StoreWriter {
    pool: PgPool,
    table: String,
    batch_size: usize,
}

impl StoreWriter {
    #[must_use]
    pub fn new(pool: PgPool, config: &DbConfig) -> Self {
        Self {
            pool,
            table: config.stores_table.clone(),
            batch_size: config.batch_size,
        }
    }

    /// Upserts the full record set, one concurrent task per fixed-size batch.
    ///
    /// Succeeds as a no-op on empty input. On the first batch failure the
    /// writer cancels its run-scoped token; tasks that have not started their
    /// statement yet return early, while in-flight statements are left to
    /// complete (best-effort early exit, not a strict abort). Only the first
    /// observed failure is returned; errors from batches that were already
    /// in flight when cancellation fired are logged and dropped.
    ///
    /// Upserts are keyed by `number`, so re-applying the same batch is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns the first [`DbError`] observed across the batch tasks.
    pub async fn write_all(&self, stores: &[Store]) -> Result<(), DbError> {
        if stores.is_empty() {
            return Ok(());
        }

        let batch_size = if self.batch_size < 1 {
            DEFAULT_BATCH_SIZE
        } else {
            self.batch_size
        };
        let statements = batch_statements(&self.table, stores, batch_size);
        let batches = statements.len();

        let cancel = CancellationToken::new();
        let mut tasks: JoinSet<Result<(), sqlx::Error>> = JoinSet::new();
        for statement in statements {
            let pool = self.pool.clone();
            let cancel = cancel.child_token();
            tasks.spawn(async move {
                if cancel.is_cancelled() {
                    return Ok(());
                }
                sqlx::query(&statement).execute(&pool).await.map(|_| ())
            });
        }

        let mut first_err: Option<DbError> = None;
        while let Some(joined) = tasks.join_next().await {
            let result = match joined {
                Ok(result) => result.map_err(DbError::from),
                Err(join_err) => Err(DbError::from(join_err)),
            };
            if let Err(err) = result {
                tracing::error!(error = %err, "failed to upsert store batch");
                if first_err.is_none() {
                    cancel.cancel();
                    first_err = Some(err);
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => {
                tracing::info!(
                    count = stores.len(),
                    batches,
                    batch_size,
                    table = %self.table,
                    "upserted stores"
                );
                Ok(())
            }
        }
    }

    /// Creates the stores table and its name lookup index if they do not
    /// exist. Non-production bootstrap only; production deployments manage
    /// the schema out of band.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if either DDL statement fails.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        let table = &self.table;
        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {table} (\n\
             \tnumber BIGINT PRIMARY KEY,\n\
             \tname TEXT NOT NULL,\n\
             \taddress TEXT NOT NULL,\n\
             \tmall TEXT NOT NULL DEFAULT '',\n\
             \tcompany TEXT NOT NULL DEFAULT '',\n\
             \tbrand TEXT NOT NULL DEFAULT '',\n\
             \tformat TEXT NOT NULL DEFAULT '',\n\
             \tstatus TEXT NOT NULL DEFAULT 'Undefined',\n\
             \ttemporary_closed BOOLEAN NOT NULL DEFAULT FALSE\n\
             )"
        );
        // Covering index: name lookups resolve to the store number without
        // touching the heap.
        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_name ON {table} (name) INCLUDE (number)"
        );

        sqlx::query(&create_table).execute(&self.pool).await?;
        sqlx::query(&create_index).execute(&self.pool).await?;
        tracing::debug!(table = %table, "stores schema bootstrapped");
        Ok(())
    }
}
