//! Catalog rows and the partial payloads used to create and update them.
//!
//! Every `*Input` type has all-optional fields: create requests are checked
//! for required fields by the store, and update requests only carry the
//! fields being changed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::table::{Merge, Record};

/// A person credited on one or more books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique identifier for the author
    pub id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
}

/// Payload for creating or updating an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
}

/// A category books can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    /// Unique identifier for the genre
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenreInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A title in the catalog, independent of how many physical copies exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: String,
    /// Title of the book
    pub title: String,
    /// Ids of the book's authors, in credit order
    pub author_ids: Vec<String>,
    /// Ids of the genres the book belongs to
    pub genre_ids: Vec<String>,
    pub isbn: String,
    pub summary: String,
}

/// Payload for creating or updating a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Lending status of a physical copy.
///
/// The store only checks membership in this set; it never moves a copy from
/// one status to another on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CopyStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "unavailable")]
    Unavailable,
    #[serde(rename = "can be checkout")]
    CanBeCheckedOut,
    #[serde(rename = "checked out")]
    CheckedOut,
}

impl CopyStatus {
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Unavailable,
        CopyStatus::CanBeCheckedOut,
        CopyStatus::CheckedOut,
    ];

    /// Wire representation, identical to the serde name
    pub const fn as_str(self) -> &'static str {
        match self {
            CopyStatus::Available => "available",
            CopyStatus::Unavailable => "unavailable",
            CopyStatus::CanBeCheckedOut => "can be checkout",
            CopyStatus::CheckedOut => "checked out",
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the [`CopyStatus`] labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCopyStatus;

impl FromStr for CopyStatus {
    type Err = UnknownCopyStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CopyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or(UnknownCopyStatus)
    }
}

/// A physical copy of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCopy {
    /// Unique identifier for the copy
    pub id: String,
    /// Id of the book this is a copy of
    pub book_id: String,
    /// Publisher and edition details of this particular printing
    pub imprint: String,
    pub status: CopyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_back_date: Option<String>,
}

/// Payload for creating or updating a copy.
///
/// `status` stays a plain string here so that unknown values surface as a
/// validation failure listing the accepted labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCopyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_back_date: Option<String>,
}

impl Record for Author {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Genre {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Book {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for BookCopy {
    fn id(&self) -> &str {
        &self.id
    }
}

fn overwrite<T: Clone>(target: &mut T, patch: &Option<T>) {
    if let Some(value) = patch {
        *target = value.clone();
    }
}

fn overwrite_optional<T: Clone>(target: &mut Option<T>, patch: &Option<T>) {
    if patch.is_some() {
        target.clone_from(patch);
    }
}

/// A blank value clears an optional text column, matching how inserts store it.
fn overwrite_optional_text(target: &mut Option<String>, patch: &Option<String>) {
    if let Some(value) = patch {
        *target = Some(value.clone()).filter(|value| !value.trim().is_empty());
    }
}

impl Merge<AuthorInput> for Author {
    fn merge(&mut self, patch: &AuthorInput) {
        overwrite(&mut self.first_name, &patch.first_name);
        overwrite_optional_text(&mut self.last_name, &patch.last_name);
        overwrite(&mut self.birth_date, &patch.birth_date);
        overwrite_optional_text(&mut self.death_date, &patch.death_date);
    }
}

impl Merge<GenreInput> for Genre {
    fn merge(&mut self, patch: &GenreInput) {
        overwrite(&mut self.name, &patch.name);
    }
}

impl Merge<BookInput> for Book {
    fn merge(&mut self, patch: &BookInput) {
        overwrite(&mut self.title, &patch.title);
        overwrite(&mut self.author_ids, &patch.author_ids);
        overwrite(&mut self.genre_ids, &patch.genre_ids);
        overwrite(&mut self.isbn, &patch.isbn);
        overwrite(&mut self.summary, &patch.summary);
    }
}

impl Merge<BookCopyInput> for BookCopy {
    fn merge(&mut self, patch: &BookCopyInput) {
        overwrite(&mut self.book_id, &patch.book_id);
        overwrite(&mut self.imprint, &patch.imprint);
        // Unknown labels are rejected before a patch ever reaches the table.
        if let Some(status) = patch.status.as_deref().and_then(|s| s.parse().ok()) {
            self.status = status;
        }
        overwrite_optional_text(&mut self.due_back_date, &patch.due_back_date);
    }
}

// Inputs merge into each other so an update can be validated as the full
// candidate record before the table is touched.

impl Merge<AuthorInput> for AuthorInput {
    fn merge(&mut self, patch: &AuthorInput) {
        overwrite_optional(&mut self.first_name, &patch.first_name);
        overwrite_optional(&mut self.last_name, &patch.last_name);
        overwrite_optional(&mut self.birth_date, &patch.birth_date);
        overwrite_optional(&mut self.death_date, &patch.death_date);
    }
}

impl Merge<GenreInput> for GenreInput {
    fn merge(&mut self, patch: &GenreInput) {
        overwrite_optional(&mut self.name, &patch.name);
    }
}

impl Merge<BookInput> for BookInput {
    fn merge(&mut self, patch: &BookInput) {
        overwrite_optional(&mut self.title, &patch.title);
        overwrite_optional(&mut self.author_ids, &patch.author_ids);
        overwrite_optional(&mut self.genre_ids, &patch.genre_ids);
        overwrite_optional(&mut self.isbn, &patch.isbn);
        overwrite_optional(&mut self.summary, &patch.summary);
    }
}

impl Merge<BookCopyInput> for BookCopyInput {
    fn merge(&mut self, patch: &BookCopyInput) {
        overwrite_optional(&mut self.book_id, &patch.book_id);
        overwrite_optional(&mut self.imprint, &patch.imprint);
        overwrite_optional(&mut self.status, &patch.status);
        overwrite_optional(&mut self.due_back_date, &patch.due_back_date);
    }
}

impl From<&Author> for AuthorInput {
    fn from(author: &Author) -> Self {
        Self {
            first_name: Some(author.first_name.clone()),
            last_name: author.last_name.clone(),
            birth_date: Some(author.birth_date.clone()),
            death_date: author.death_date.clone(),
        }
    }
}

impl From<&Genre> for GenreInput {
    fn from(genre: &Genre) -> Self {
        Self {
            name: Some(genre.name.clone()),
        }
    }
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            author_ids: Some(book.author_ids.clone()),
            genre_ids: Some(book.genre_ids.clone()),
            isbn: Some(book.isbn.clone()),
            summary: Some(book.summary.clone()),
        }
    }
}

impl From<&BookCopy> for BookCopyInput {
    fn from(copy: &BookCopy) -> Self {
        Self {
            book_id: Some(copy.book_id.clone()),
            imprint: Some(copy.imprint.clone()),
            status: Some(copy.status.as_str().to_string()),
            due_back_date: copy.due_back_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Book {
        Book {
            id: "b1".to_string(),
            title: "Kindred".to_string(),
            author_ids: vec!["a1".to_string()],
            genre_ids: vec!["g1".to_string()],
            isbn: "9780807083697".to_string(),
            summary: "Time travel to antebellum Maryland".to_string(),
        }
    }

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(book()).unwrap();
        assert_eq!(value["authorIds"], json!(["a1"]));
        assert_eq!(value["genreIds"], json!(["g1"]));
        assert!(value.get("author_ids").is_none());
    }

    #[test]
    fn copy_status_uses_catalog_labels() {
        assert_eq!(
            serde_json::to_value(CopyStatus::CanBeCheckedOut).unwrap(),
            json!("can be checkout")
        );
        assert_eq!("checked out".parse::<CopyStatus>(), Ok(CopyStatus::CheckedOut));
        assert_eq!("lost".parse::<CopyStatus>(), Err(UnknownCopyStatus));
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut book = book();
        book.merge(&BookInput {
            title: Some("Kindred (25th anniversary)".to_string()),
            ..BookInput::default()
        });

        assert_eq!(book.id, "b1");
        assert_eq!(book.title, "Kindred (25th anniversary)");
        assert_eq!(book.isbn, "9780807083697");
        assert_eq!(book.author_ids, ["a1"]);
    }

    #[test]
    fn copy_merge_ignores_unknown_status() {
        let mut copy = BookCopy {
            id: "c1".to_string(),
            book_id: "b1".to_string(),
            imprint: "Beacon Press, 2003".to_string(),
            status: CopyStatus::Available,
            due_back_date: None,
        };
        copy.merge(&BookCopyInput {
            status: Some("lost".to_string()),
            due_back_date: Some("2026-11-01".to_string()),
            ..BookCopyInput::default()
        });

        assert_eq!(copy.status, CopyStatus::Available);
        assert_eq!(copy.due_back_date.as_deref(), Some("2026-11-01"));
    }

    #[test]
    fn blank_optional_text_clears_the_column() {
        let mut author = Author {
            id: "a1".to_string(),
            first_name: "Octavia".to_string(),
            last_name: Some("Butler".to_string()),
            birth_date: "1947-06-22".to_string(),
            death_date: Some("2006-02-24".to_string()),
        };
        author.merge(&AuthorInput {
            death_date: Some("  ".to_string()),
            ..AuthorInput::default()
        });

        assert_eq!(author.last_name.as_deref(), Some("Butler"));
        assert!(author.death_date.is_none());
    }

    #[test]
    fn input_deserializes_missing_fields_as_none() {
        let input: AuthorInput = serde_json::from_value(json!({
            "firstName": "Jane",
            "birthDate": "1980-01-01"
        }))
        .unwrap();

        assert_eq!(input.first_name.as_deref(), Some("Jane"));
        assert!(input.last_name.is_none());
        assert!(input.death_date.is_none());
    }
}
