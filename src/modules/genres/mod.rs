use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_db::{CatalogStore, Genre, GenreInput};
use catalog_http::error::AppError;
use catalog_kernel::Module;
use serde_json::json;

use crate::utils;

pub struct GenresModule {
    store: Arc<CatalogStore>,
}

impl GenresModule {
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for GenresModule {
    fn name(&self) -> &'static str {
        "genres"
    }

    fn routes(&self) -> Option<Router> {
        Some(
            Router::new()
                .route("/", get(list_genres).post(create_genre))
                .route(
                    "/{id}",
                    get(get_genre).put(update_genre).delete(delete_genre),
                )
                .with_state(self.store.clone()),
        )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": utils::crud_paths("Genres", "Genre", "Genre", "GenreInput"),
            "components": {
                "schemas": {
                    "Genre": utils::schema_json::<Genre>(),
                    "GenreInput": utils::schema_json::<GenreInput>()
                }
            }
        }))
    }
}

async fn list_genres(State(store): State<Arc<CatalogStore>>) -> Json<Vec<Genre>> {
    Json(store.list_genres())
}

async fn get_genre(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<Genre>, AppError> {
    Ok(Json(store.get_genre(&id)?))
}

async fn create_genre(
    State(store): State<Arc<CatalogStore>>,
    payload: Result<Json<GenreInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Genre>), AppError> {
    let Json(input) = payload?;
    let genre = store.create_genre(input)?;
    Ok((StatusCode::CREATED, Json(genre)))
}

async fn update_genre(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<GenreInput>, JsonRejection>,
) -> Result<Json<Genre>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(store.update_genre(&id, patch)?))
}

async fn delete_genre(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete_genre(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the genres module
pub fn create_module(store: Arc<CatalogStore>) -> Arc<dyn Module> {
    Arc::new(GenresModule::new(store))
}
