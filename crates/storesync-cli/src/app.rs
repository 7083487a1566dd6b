//! The fetch → normalize → write pipeline.

use anyhow::Context;

use storesync_core::{Config, Mode};
use storesync_db::StoreWriter;
use storesync_esb::{normalize_store, EsbClient};

/// Holds the constructed clients for one run. A failed client construction
/// is fatal before the pipeline starts, same as a fatal source or
/// destination error.
pub struct App {
    esb: EsbClient,
    writer: StoreWriter,
}

impl App {
    /// Builds the source client and the destination writer from the loaded
    /// configuration. In dev mode this also bootstraps the stores schema.
    ///
    /// # Errors
    ///
    /// Returns an error if either client cannot be constructed or the dev
    /// schema bootstrap fails.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let esb = EsbClient::new(&config.esb).context("constructing ESB client")?;

        let pool = storesync_db::connect_pool(&config.db)
            .await
            .context("connecting to destination store")?;
        let writer = StoreWriter::new(pool, &config.db);

        if config.app.mode == Mode::Dev {
            writer
                .init_schema()
                .await
                .context("bootstrapping stores schema")?;
        }

        Ok(Self { esb, writer })
    }

    /// Runs one synchronization pass.
    ///
    /// A fetch or write failure aborts the run. A record that fails
    /// normalization is logged with its raw payload and skipped; it never
    /// aborts the run. Zero surviving records still reach `write_all`,
    /// which treats the empty set as a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's or the writer's fatal error, with context.
    pub async fn run(&self) -> anyhow::Result<()> {
        let raw_stores = self
            .esb
            .fetch_all_stores()
            .await
            .context("fetching store catalog")?;

        let total = raw_stores.len();
        let mut stores = Vec::with_capacity(total);
        for (index, raw) in raw_stores.iter().enumerate() {
            match normalize_store(raw) {
                Ok(store) => stores.push(store),
                Err(err) => {
                    tracing::error!(
                        index,
                        error = %err,
                        raw = ?raw,
                        "failed to normalize store record; skipping"
                    );
                }
            }
        }
        tracing::info!(
            total,
            valid = stores.len(),
            skipped = total - stores.len(),
            "normalized store catalog"
        );

        self.writer
            .write_all(&stores)
            .await
            .context("writing stores to destination")?;

        Ok(())
    }
}
