use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_db::{BookCopy, BookCopyInput, CatalogStore, CopyStatus};
use catalog_http::error::AppError;
use catalog_kernel::{InitCtx, Module};
use serde::Deserialize;
use serde_json::json;

use crate::utils;

/// Book copies module, mounted as `book-copies`
pub struct CopiesModule {
    store: Arc<CatalogStore>,
}

impl CopiesModule {
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }
}

/// Optional filters for listing copies, applied after the full list is read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFilter {
    pub book_id: Option<String>,
    pub status: Option<String>,
}

impl CopyFilter {
    pub fn matches(&self, copy: &BookCopy) -> bool {
        let book_matches = self
            .book_id
            .as_deref()
            .map_or(true, |book_id| copy.book_id == book_id);
        let status_matches = self
            .status
            .as_deref()
            .map_or(true, |status| copy.status.as_str() == status);
        book_matches && status_matches
    }
}

#[async_trait]
impl Module for CopiesModule {
    fn name(&self) -> &'static str {
        "book-copies"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "book copies module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Option<Router> {
        Some(
            Router::new()
                .route("/", get(list_copies).post(create_copy))
                .route("/{id}", get(get_copy).put(update_copy).delete(delete_copy))
                .with_state(self.store.clone()),
        )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut paths = utils::crud_paths("Book copies", "Book copy", "BookCopy", "BookCopyInput");
        let statuses: Vec<&str> = CopyStatus::ALL.iter().map(|s| s.as_str()).collect();
        paths["/"]["get"]["parameters"] = json!([
            {
                "name": "bookId",
                "in": "query",
                "required": false,
                "description": "Only copies of this book",
                "schema": { "type": "string" }
            },
            {
                "name": "status",
                "in": "query",
                "required": false,
                "description": "Only copies with this status",
                "schema": { "type": "string", "enum": statuses }
            }
        ]);

        Some(json!({
            "paths": paths,
            "components": {
                "schemas": {
                    "BookCopy": utils::schema_json::<BookCopy>(),
                    "BookCopyInput": utils::schema_json::<BookCopyInput>(),
                    "CopyStatus": utils::schema_json::<CopyStatus>()
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book copies module stopped");
        Ok(())
    }
}

async fn list_copies(
    State(store): State<Arc<CatalogStore>>,
    Query(filter): Query<CopyFilter>,
) -> Json<Vec<BookCopy>> {
    let copies = store
        .list_copies()
        .into_iter()
        .filter(|copy| filter.matches(copy))
        .collect();
    Json(copies)
}

async fn get_copy(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<BookCopy>, AppError> {
    Ok(Json(store.get_copy(&id)?))
}

async fn create_copy(
    State(store): State<Arc<CatalogStore>>,
    payload: Result<Json<BookCopyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<BookCopy>), AppError> {
    let Json(input) = payload?;
    let copy = store.create_copy(input)?;
    Ok((StatusCode::CREATED, Json(copy)))
}

async fn update_copy(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<BookCopyInput>, JsonRejection>,
) -> Result<Json<BookCopy>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(store.update_copy(&id, patch)?))
}

async fn delete_copy(
    State(store): State<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete_copy(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the book copies module
pub fn create_module(store: Arc<CatalogStore>) -> Arc<dyn Module> {
    Arc::new(CopiesModule::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(book_id: &str, status: CopyStatus) -> BookCopy {
        BookCopy {
            id: format!("{book_id}-{status}"),
            book_id: book_id.to_string(),
            imprint: "Gollancz".to_string(),
            status,
            due_back_date: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = CopyFilter::default();
        assert!(filter.matches(&copy("b1", CopyStatus::CheckedOut)));
    }

    #[test]
    fn filters_combine() {
        let filter = CopyFilter {
            book_id: Some("b1".to_string()),
            status: Some("can be checkout".to_string()),
        };

        assert!(filter.matches(&copy("b1", CopyStatus::CanBeCheckedOut)));
        assert!(!filter.matches(&copy("b1", CopyStatus::Available)));
        assert!(!filter.matches(&copy("b2", CopyStatus::CanBeCheckedOut)));
    }
}
