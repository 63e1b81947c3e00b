use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_db::{Author, AuthorInput, CatalogStore};
use catalog_http::error::AppError;
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils;

/// Authors module: CRUD over the author table
pub struct AuthorsModule {
    store: Arc<CatalogStore>,
}

impl AuthorsModule {
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Option<Router> {
        let prefix = utils::log_prefix(self.name());
        tracing::debug!(target: "project.routes", %prefix, "registering author routes");

        Some(
            Router::new()
                .route("/", get(list_authors).post(create_author))
                .route(
                    "/{id}",
                    get(get_author).put(update_author).delete(delete_author),
                )
                .with_state(self.store.clone()),
        )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": utils::crud_paths("Authors", "Author", "Author", "AuthorInput"),
            "components": {
                "schemas": {
                    "Author": utils::schema_json::<Author>(),
                    "AuthorInput": utils::schema_json::<AuthorInput>()
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

async fn list_authors(State(store): State<Arc<CatalogStore>>) -> Json<Vec<Author>> {
    Json(store.list_authors())
}

async fn get_author(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<Author>, AppError> {
    Ok(Json(store.get_author(&id)?))
}

async fn create_author(
    State(store): State<Arc<CatalogStore>>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(input) = payload?;
    let author = store.create_author(input)?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn update_author(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(store.update_author(&id, patch)?))
}

async fn delete_author(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete_author(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the authors module
pub fn create_module(store: Arc<CatalogStore>) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(store))
}
