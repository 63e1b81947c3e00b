pub mod authors;
pub mod books;
pub mod copies;
pub mod genres;
pub mod store;

use std::sync::Arc;

use catalog_db::CatalogStore;
use catalog_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<CatalogStore>) {
    registry.register_core(store::create_module(store.clone()));
    registry.register_custom(authors::create_module(store.clone()));
    registry.register_custom(genres::create_module(store.clone()));
    registry.register_custom(books::create_module(store.clone()));
    registry.register_custom(copies::create_module(store));
}
