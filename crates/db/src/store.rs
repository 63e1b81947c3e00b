//! Store facade: the only entry point into the catalog tables.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EntityKind, StoreError, StoreResult};
use crate::id::{IdGenerator, UuidV7Ids};
use crate::integrity::{self, Tables};
use crate::models::{
    Author, AuthorInput, Book, BookCopy, BookCopyInput, BookInput, Genre, GenreInput,
};
use crate::table::Merge;

/// Row counts per table, in a single consistent snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub authors: usize,
    pub genres: usize,
    pub books: usize,
    pub copies: usize,
}

/// In-memory catalog of authors, genres, books and copies.
///
/// All four tables sit behind one lock. Reads share it; every write, including
/// the book-to-copies cascade, holds it exclusively for its whole duration.
/// Each write computes and validates the new row before touching a table, so
/// a poisoned lock never exposes a half-applied change and is simply
/// recovered.
pub struct CatalogStore {
    tables: RwLock<Tables>,
    ids: Box<dyn IdGenerator>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create an empty store using UUIDv7 identifiers
    pub fn new() -> Self {
        Self::with_id_generator(UuidV7Ids)
    }

    /// Create an empty store with a custom identifier source
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            ids: Box::new(ids),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn counts(&self) -> CatalogCounts {
        let tables = self.read();
        CatalogCounts {
            authors: tables.authors.len(),
            genres: tables.genres.len(),
            books: tables.books.len(),
            copies: tables.copies.len(),
        }
    }

    // Authors

    pub fn list_authors(&self) -> Vec<Author> {
        self.read().authors.rows().to_vec()
    }

    pub fn get_author(&self, id: &str) -> StoreResult<Author> {
        self.read()
            .authors
            .find(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Author))
    }

    pub fn create_author(&self, input: AuthorInput) -> StoreResult<Author> {
        let author = integrity::author(self.ids.next_id(), input)?;
        let mut tables = self.write();
        let stored = tables.authors.insert(author).clone();
        tracing::debug!(entity = %EntityKind::Author, id = %stored.id, "row created");
        Ok(stored)
    }

    pub fn update_author(&self, id: &str, patch: AuthorInput) -> StoreResult<Author> {
        let mut tables = self.write();
        let current = tables
            .authors
            .find(id)
            .ok_or(StoreError::not_found(EntityKind::Author))?;

        let mut candidate = AuthorInput::from(current);
        candidate.merge(&patch);
        integrity::author(id.to_string(), candidate)?;

        let updated = tables
            .authors
            .update(id, &patch)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Author))?;
        tracing::debug!(entity = %EntityKind::Author, id, "row updated");
        Ok(updated)
    }

    /// Remove an author. Books citing it are left as they are.
    pub fn delete_author(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.write();
        if !tables.authors.remove(id) {
            return Err(StoreError::not_found(EntityKind::Author));
        }

        let citing = integrity::books_citing_author(&tables.books, id);
        if citing > 0 {
            tracing::warn!(
                entity = %EntityKind::Author,
                id,
                books = citing,
                "author removed while still referenced by books"
            );
        }
        tracing::debug!(entity = %EntityKind::Author, id, "row deleted");
        Ok(())
    }

    // Genres

    pub fn list_genres(&self) -> Vec<Genre> {
        self.read().genres.rows().to_vec()
    }

    pub fn get_genre(&self, id: &str) -> StoreResult<Genre> {
        self.read()
            .genres
            .find(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Genre))
    }

    pub fn create_genre(&self, input: GenreInput) -> StoreResult<Genre> {
        let genre = integrity::genre(self.ids.next_id(), input)?;
        let mut tables = self.write();
        let stored = tables.genres.insert(genre).clone();
        tracing::debug!(entity = %EntityKind::Genre, id = %stored.id, "row created");
        Ok(stored)
    }

    pub fn update_genre(&self, id: &str, patch: GenreInput) -> StoreResult<Genre> {
        let mut tables = self.write();
        let current = tables
            .genres
            .find(id)
            .ok_or(StoreError::not_found(EntityKind::Genre))?;

        let mut candidate = GenreInput::from(current);
        candidate.merge(&patch);
        integrity::genre(id.to_string(), candidate)?;

        let updated = tables
            .genres
            .update(id, &patch)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Genre))?;
        tracing::debug!(entity = %EntityKind::Genre, id, "row updated");
        Ok(updated)
    }

    /// Remove a genre. Books filed under it are left as they are.
    pub fn delete_genre(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.write();
        if !tables.genres.remove(id) {
            return Err(StoreError::not_found(EntityKind::Genre));
        }

        let filed = integrity::books_in_genre(&tables.books, id);
        if filed > 0 {
            tracing::warn!(
                entity = %EntityKind::Genre,
                id,
                books = filed,
                "genre removed while still referenced by books"
            );
        }
        tracing::debug!(entity = %EntityKind::Genre, id, "row deleted");
        Ok(())
    }

    // Books

    pub fn list_books(&self) -> Vec<Book> {
        self.read().books.rows().to_vec()
    }

    pub fn get_book(&self, id: &str) -> StoreResult<Book> {
        self.read()
            .books
            .find(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Book))
    }

    pub fn create_book(&self, input: BookInput) -> StoreResult<Book> {
        let id = self.ids.next_id();
        let mut tables = self.write();
        let book = integrity::book(id, input, &tables.authors, &tables.genres)?;
        let stored = tables.books.insert(book).clone();
        tracing::debug!(entity = %EntityKind::Book, id = %stored.id, "row created");
        Ok(stored)
    }

    pub fn update_book(&self, id: &str, patch: BookInput) -> StoreResult<Book> {
        let mut tables = self.write();
        let current = tables
            .books
            .find(id)
            .ok_or(StoreError::not_found(EntityKind::Book))?;

        let mut candidate = BookInput::from(current);
        candidate.merge(&patch);
        integrity::book(id.to_string(), candidate, &tables.authors, &tables.genres)?;

        let updated = tables
            .books
            .update(id, &patch)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Book))?;
        tracing::debug!(entity = %EntityKind::Book, id, "row updated");
        Ok(updated)
    }

    /// Remove a book together with all of its copies.
    pub fn delete_book(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.write();
        let copies = integrity::remove_book(&mut tables, id)?;
        tracing::info!(
            entity = %EntityKind::Book,
            id,
            copies,
            "book deleted with its copies"
        );
        Ok(())
    }

    // Copies

    pub fn list_copies(&self) -> Vec<BookCopy> {
        self.read().copies.rows().to_vec()
    }

    pub fn get_copy(&self, id: &str) -> StoreResult<BookCopy> {
        self.read()
            .copies
            .find(id)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Copy))
    }

    pub fn create_copy(&self, input: BookCopyInput) -> StoreResult<BookCopy> {
        let id = self.ids.next_id();
        let mut tables = self.write();
        let copy = integrity::copy(id, input, &tables.books)?;
        let stored = tables.copies.insert(copy).clone();
        tracing::debug!(entity = %EntityKind::Copy, id = %stored.id, "row created");
        Ok(stored)
    }

    pub fn update_copy(&self, id: &str, patch: BookCopyInput) -> StoreResult<BookCopy> {
        let mut tables = self.write();
        let current = tables
            .copies
            .find(id)
            .ok_or(StoreError::not_found(EntityKind::Copy))?;

        let mut candidate = BookCopyInput::from(current);
        candidate.merge(&patch);
        integrity::copy(id.to_string(), candidate, &tables.books)?;

        let updated = tables
            .copies
            .update(id, &patch)
            .cloned()
            .ok_or(StoreError::not_found(EntityKind::Copy))?;
        tracing::debug!(entity = %EntityKind::Copy, id, "row updated");
        Ok(updated)
    }

    pub fn delete_copy(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.write();
        if !tables.copies.remove(id) {
            return Err(StoreError::not_found(EntityKind::Copy));
        }
        tracing::debug!(entity = %EntityKind::Copy, id, "row deleted");
        Ok(())
    }
}
