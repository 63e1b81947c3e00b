//! Write-time checks across tables and the book deletion cascade.
//!
//! # Invariants
//! - A book's author and genre ids resolve when the book is written.
//! - A copy's book id resolves when the copy is written.
//! - Removing a book removes its copies in the same step.
//!
//! References are not re-checked when an author, genre or book is removed
//! later on, so dangling ids can exist in stored rows.

use crate::error::{EntityKind, StoreError, StoreResult};
use crate::models::{
    Author, AuthorInput, Book, BookCopy, BookCopyInput, BookInput, CopyStatus, Genre, GenreInput,
};
use crate::table::{Record, Table};

/// The four entity tables guarded together by the store lock.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub authors: Table<Author>,
    pub genres: Table<Genre>,
    pub books: Table<Book>,
    pub copies: Table<BookCopy>,
}

/// Collects the names of required fields that are absent or blank.
#[derive(Default)]
struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    fn text(&mut self, field: &'static str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    fn list(&mut self, field: &'static str, value: Option<Vec<String>>) -> Vec<String> {
        value.unwrap_or_else(|| {
            self.missing.push(field);
            Vec::new()
        })
    }

    fn check(self) -> StoreResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::validation(format!(
                "Missing required fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Blank optional text is stored as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Every id in `ids` that has no row in `table`, in the order given.
fn unresolved<'a, T: Record>(ids: &'a [String], table: &Table<T>) -> Vec<&'a str> {
    ids.iter()
        .filter(|id| !table.contains(id))
        .map(String::as_str)
        .collect()
}

pub(crate) fn author(id: String, input: AuthorInput) -> StoreResult<Author> {
    let mut required = Required::default();
    let first_name = required.text("firstName", input.first_name);
    let birth_date = required.text("birthDate", input.birth_date);
    required.check()?;

    Ok(Author {
        id,
        first_name,
        last_name: optional_text(input.last_name),
        birth_date,
        death_date: optional_text(input.death_date),
    })
}

pub(crate) fn genre(id: String, input: GenreInput) -> StoreResult<Genre> {
    let mut required = Required::default();
    let name = required.text("name", input.name);
    required.check()?;

    Ok(Genre { id, name })
}

/// Validate a book payload against the author and genre tables.
///
/// Checks run in a fixed order and the first failing one is reported.
/// Reference checks list every unresolved id rather than just the first.
pub(crate) fn book(
    id: String,
    input: BookInput,
    authors: &Table<Author>,
    genres: &Table<Genre>,
) -> StoreResult<Book> {
    let mut required = Required::default();
    let title = required.text("title", input.title);
    let author_ids = required.list("authorIds", input.author_ids);
    let genre_ids = required.list("genreIds", input.genre_ids);
    let isbn = required.text("isbn", input.isbn);
    let summary = required.text("summary", input.summary);
    required.check()?;

    if author_ids.is_empty() {
        return Err(StoreError::validation(
            "authorIds must be a non-empty array",
        ));
    }
    if genre_ids.is_empty() {
        return Err(StoreError::validation("genreIds must be a non-empty array"));
    }

    let missing_authors = unresolved(&author_ids, authors);
    if !missing_authors.is_empty() {
        return Err(StoreError::validation(format!(
            "Invalid author IDs: {}",
            missing_authors.join(", ")
        )));
    }

    let missing_genres = unresolved(&genre_ids, genres);
    if !missing_genres.is_empty() {
        return Err(StoreError::validation(format!(
            "Invalid genre IDs: {}",
            missing_genres.join(", ")
        )));
    }

    Ok(Book {
        id,
        title,
        author_ids,
        genre_ids,
        isbn,
        summary,
    })
}

fn invalid_status_message() -> String {
    let labels: Vec<&str> = CopyStatus::ALL.iter().map(|s| s.as_str()).collect();
    format!("Invalid status. Must be one of: {}", labels.join(", "))
}

/// Validate a copy payload against the book table.
pub(crate) fn copy(id: String, input: BookCopyInput, books: &Table<Book>) -> StoreResult<BookCopy> {
    let mut required = Required::default();
    let book_id = required.text("bookId", input.book_id);
    let imprint = required.text("imprint", input.imprint);
    let status = required.text("status", input.status);
    required.check()?;

    if !books.contains(&book_id) {
        return Err(StoreError::validation("Invalid book ID"));
    }

    let status: CopyStatus = status
        .parse()
        .map_err(|_| StoreError::validation(invalid_status_message()))?;

    Ok(BookCopy {
        id,
        book_id,
        imprint,
        status,
        due_back_date: optional_text(input.due_back_date),
    })
}

/// Remove a book and every copy pointing at it.
///
/// Runs against a single `&mut Tables`, so callers holding the store's write
/// guard observe both removals or neither. Returns the number of copies
/// removed.
pub(crate) fn remove_book(tables: &mut Tables, id: &str) -> StoreResult<usize> {
    if !tables.books.contains(id) {
        return Err(StoreError::not_found(EntityKind::Book));
    }

    let copies = tables.copies.remove_where(|copy| copy.book_id == id);
    tables.books.remove(id);
    Ok(copies)
}

/// Number of books that still list `author_id` among their authors.
pub(crate) fn books_citing_author(books: &Table<Book>, author_id: &str) -> usize {
    books
        .rows()
        .iter()
        .filter(|book| book.author_ids.iter().any(|id| id == author_id))
        .count()
}

/// Number of books that still list `genre_id` among their genres.
pub(crate) fn books_in_genre(books: &Table<Book>, genre_id: &str) -> usize {
    books
        .rows()
        .iter()
        .filter(|book| book.genre_ids.iter().any(|id| id == genre_id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Tables {
        let mut tables = Tables::default();
        tables.authors.insert(Author {
            id: "a1".to_string(),
            first_name: "Octavia".to_string(),
            last_name: Some("Butler".to_string()),
            birth_date: "1947-06-22".to_string(),
            death_date: Some("2006-02-24".to_string()),
        });
        tables.genres.insert(Genre {
            id: "g1".to_string(),
            name: "Science Fiction".to_string(),
        });
        tables
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn book_input() -> BookInput {
        BookInput {
            title: Some("Kindred".to_string()),
            author_ids: Some(strings(&["a1"])),
            genre_ids: Some(strings(&["g1"])),
            isbn: Some("9780807083697".to_string()),
            summary: Some("A writer is pulled back in time.".to_string()),
        }
    }

    fn book_error(input: BookInput) -> StoreError {
        let tables = tables();
        book("b1".to_string(), input, &tables.authors, &tables.genres).unwrap_err()
    }

    #[test]
    fn valid_book_keeps_reference_order() {
        let tables = tables();
        let built = book("b1".to_string(), book_input(), &tables.authors, &tables.genres).unwrap();

        assert_eq!(built.id, "b1");
        assert_eq!(built.author_ids, ["a1"]);
        assert_eq!(built.genre_ids, ["g1"]);
    }

    #[test]
    fn missing_fields_are_listed_together() {
        let error = book_error(BookInput {
            title: Some("  ".to_string()),
            summary: None,
            ..book_input()
        });
        assert_eq!(
            error,
            StoreError::validation("Missing required fields: title, summary")
        );
    }

    #[test]
    fn array_shape_is_checked_before_references() {
        let error = book_error(BookInput {
            author_ids: Some(strings(&["nope"])),
            genre_ids: Some(Vec::new()),
            ..book_input()
        });
        assert_eq!(
            error,
            StoreError::validation("genreIds must be a non-empty array")
        );

        let error = book_error(BookInput {
            author_ids: Some(Vec::new()),
            genre_ids: Some(Vec::new()),
            ..book_input()
        });
        assert_eq!(
            error,
            StoreError::validation("authorIds must be a non-empty array")
        );
    }

    #[test]
    fn every_unknown_author_is_reported() {
        let error = book_error(BookInput {
            author_ids: Some(strings(&["x1", "a1", "x2"])),
            genre_ids: Some(strings(&["nope"])),
            ..book_input()
        });
        assert_eq!(error, StoreError::validation("Invalid author IDs: x1, x2"));
    }

    #[test]
    fn unknown_genres_are_reported_after_authors_pass() {
        let error = book_error(BookInput {
            genre_ids: Some(strings(&["g1", "g9"])),
            ..book_input()
        });
        assert_eq!(error, StoreError::validation("Invalid genre IDs: g9"));
    }

    #[test]
    fn copy_requires_existing_book_before_status() {
        let tables = tables();
        let error = copy(
            "c1".to_string(),
            BookCopyInput {
                book_id: Some("missing".to_string()),
                imprint: Some("Beacon".to_string()),
                status: Some("lost".to_string()),
                due_back_date: None,
            },
            &tables.books,
        )
        .unwrap_err();

        assert_eq!(error, StoreError::validation("Invalid book ID"));
    }

    #[test]
    fn copy_status_error_lists_valid_labels() {
        let mut tables = tables();
        let stored = book("b1".to_string(), book_input(), &tables.authors, &tables.genres).unwrap();
        tables.books.insert(stored);

        let error = copy(
            "c1".to_string(),
            BookCopyInput {
                book_id: Some("b1".to_string()),
                imprint: Some("Beacon".to_string()),
                status: Some("lost".to_string()),
                due_back_date: None,
            },
            &tables.books,
        )
        .unwrap_err();

        assert_eq!(
            error,
            StoreError::validation(
                "Invalid status. Must be one of: available, unavailable, can be checkout, checked out"
            )
        );
    }

    #[test]
    fn author_requires_first_name_and_birth_date() {
        let error = author("a2".to_string(), AuthorInput::default()).unwrap_err();
        assert_eq!(
            error,
            StoreError::validation("Missing required fields: firstName, birthDate")
        );
    }

    #[test]
    fn remove_book_drops_only_its_copies() {
        let mut tables = tables();
        for id in ["b1", "b2"] {
            let stored = book(id.to_string(), book_input(), &tables.authors, &tables.genres).unwrap();
            tables.books.insert(stored);
        }
        for (id, book_id) in [("c1", "b1"), ("c2", "b2"), ("c3", "b1")] {
            tables.copies.insert(BookCopy {
                id: id.to_string(),
                book_id: book_id.to_string(),
                imprint: "Beacon".to_string(),
                status: CopyStatus::Available,
                due_back_date: None,
            });
        }

        assert_eq!(remove_book(&mut tables, "b1"), Ok(2));
        assert!(!tables.books.contains("b1"));
        assert_eq!(tables.copies.len(), 1);
        assert_eq!(tables.copies.rows()[0].book_id, "b2");

        assert_eq!(
            remove_book(&mut tables, "b1"),
            Err(StoreError::not_found(EntityKind::Book))
        );
    }
}
