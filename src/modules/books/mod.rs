use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_db::{Book, BookInput, CatalogStore};
use catalog_http::error::AppError;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils;

/// Books module: CRUD over the book table.
///
/// Creating or updating a book requires every referenced author and genre to
/// exist; deleting a book also deletes its copies.
pub struct BooksModule {
    store: Arc<CatalogStore>,
}

impl BooksModule {
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Option<Router> {
        let prefix = utils::log_prefix(self.name());
        tracing::debug!(target: "project.routes", %prefix, "registering book routes");

        Some(
            Router::new()
                .route("/", get(list_books).post(create_book))
                .route("/{id}", get(get_book).put(update_book).delete(delete_book))
                .with_state(self.store.clone()),
        )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut paths = utils::crud_paths("Books", "Book", "Book", "BookInput");
        paths["/{id}"]["delete"]["description"] =
            json!("Also deletes every copy of the book.");

        Some(json!({
            "paths": paths,
            "components": {
                "schemas": {
                    "Book": utils::schema_json::<Book>(),
                    "BookInput": utils::schema_json::<BookInput>()
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.counts().books,
            "books module started"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// List books endpoint
async fn list_books(State(store): State<Arc<CatalogStore>>) -> Json<Vec<Book>> {
    Json(store.list_books())
}

async fn get_book(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(store.get_book(&id)?))
}

/// Create book endpoint; reference errors come back as 400
async fn create_book(
    State(store): State<Arc<CatalogStore>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(input) = payload?;
    let book = store.create_book(input)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(store.update_book(&id, patch)?))
}

async fn delete_book(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete_book(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<CatalogStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
