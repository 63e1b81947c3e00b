//! In-memory relational store for the library catalog.
//!
//! Four insertion-ordered tables (authors, genres, books, copies) sit behind
//! [`CatalogStore`], the only type that knows about cross-entity rules:
//! book references to authors and genres, copy references to books, and the
//! book-to-copies cascade on delete.

pub mod error;
pub mod id;
mod integrity;
pub mod models;
pub mod seed;
pub mod store;
pub mod table;

pub use error::{EntityKind, StoreError, StoreResult};
pub use id::{IdGenerator, UuidV7Ids};
pub use models::{
    Author, AuthorInput, Book, BookCopy, BookCopyInput, BookInput, CopyStatus, Genre, GenreInput,
};
pub use seed::{seed_sample_data, SeedReport};
pub use store::{CatalogCounts, CatalogStore};
pub use table::{Merge, Record, Table};
