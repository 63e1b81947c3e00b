use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use catalog_db::{seed_sample_data, CatalogStore};
use catalog_kernel::{InitCtx, Module};

/// Core module owning the shared catalog store
pub struct StoreModule {
    store: Arc<CatalogStore>,
}

impl StoreModule {
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for StoreModule {
    fn name(&self) -> &'static str {
        "store"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.store.seed_sample_data {
            seed_sample_data(&self.store).context("failed to seed sample catalog")?;
        }

        let counts = self.store.counts();
        tracing::info!(
            module = self.name(),
            authors = counts.authors,
            genres = counts.genres,
            books = counts.books,
            copies = counts.copies,
            "catalog store ready"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        // Nothing is persisted; the catalog is dropped with the process.
        tracing::info!(module = self.name(), counts = ?self.store.counts(), "catalog store stopped");
        Ok(())
    }
}

/// Create a new instance of the store module
pub fn create_module(store: Arc<CatalogStore>) -> Arc<dyn Module> {
    Arc::new(StoreModule::new(store))
}
