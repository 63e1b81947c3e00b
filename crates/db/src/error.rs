//! Error types returned by the catalog store

use std::fmt;

use thiserror::Error;

/// The kind of row an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Genre,
    Book,
    Copy,
}

impl EntityKind {
    /// Human-readable name used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Genre => "Genre",
            EntityKind::Book => "Book",
            EntityKind::Copy => "Book copy",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors produced by store operations.
///
/// Neither variant is fatal or transient; callers translate them into
/// whatever their transport expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: EntityKind },

    #[error("{0}")]
    Validation(String),
}

impl StoreError {
    /// Create a not found error for the given entity kind
    pub fn not_found(entity: EntityKind) -> Self {
        Self::NotFound { entity }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(
            StoreError::not_found(EntityKind::Author).to_string(),
            "Author not found"
        );
        assert_eq!(
            StoreError::not_found(EntityKind::Copy).to_string(),
            "Book copy not found"
        );
    }

    #[test]
    fn validation_message_is_passed_through() {
        let error = StoreError::validation("Invalid book ID");
        assert_eq!(error.to_string(), "Invalid book ID");
    }
}
