//! Library catalog application
//!
//! Wires the catalog store into kernel modules and runs them behind the HTTP facade.

pub mod modules;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use catalog_db::CatalogStore;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every catalog module, all sharing `store`.
pub fn build_registry(store: Arc<CatalogStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Run the catalog service until ctrl-c is received.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(CatalogStore::new());
    let registry = build_registry(store);

    tracing::info!(
        core = registry.core_module_count(),
        custom = registry.custom_module_count(),
        "catalog modules registered"
    );

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.start_all(&ctx).await?;

    catalog_http::start_server(&registry, &settings, shutdown_signal())
        .await
        .context("catalog HTTP server exited with an error")?;

    registry.stop_all().await?;
    tracing::info!("catalog shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
