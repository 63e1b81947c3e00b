//! Fixed sample rows for local development.

use crate::error::StoreResult;
use crate::models::{AuthorInput, BookCopyInput, BookInput, GenreInput};
use crate::store::{CatalogCounts, CatalogStore};

/// Rows inserted by [`seed_sample_data`].
pub type SeedReport = CatalogCounts;

struct SampleBook {
    title: &'static str,
    author: usize,
    genres: &'static [usize],
    isbn: &'static str,
    summary: &'static str,
    copies: &'static [(&'static str, &'static str)],
}

const AUTHORS: &[(&str, &str, &str, Option<&str>)] = &[
    ("Ursula", "Le Guin", "1929-10-21", Some("2018-01-22")),
    ("Octavia", "Butler", "1947-06-22", Some("2006-02-24")),
    ("Terry", "Pratchett", "1948-04-28", Some("2015-03-12")),
];

const GENRES: &[&str] = &["Science Fiction", "Fantasy", "Satire"];

const BOOKS: &[SampleBook] = &[
    SampleBook {
        title: "The Left Hand of Darkness",
        author: 0,
        genres: &[0],
        isbn: "9780441478125",
        summary: "An envoy tries to bring the ambisexual people of Gethen into an interstellar union.",
        copies: &[("Ace Books, 1969", "available"), ("Ace Books, 1976", "checked out")],
    },
    SampleBook {
        title: "Kindred",
        author: 1,
        genres: &[0, 1],
        isbn: "9780807083697",
        summary: "A writer in 1976 Los Angeles is repeatedly pulled back to an antebellum plantation.",
        copies: &[("Beacon Press, 2003", "can be checkout")],
    },
    SampleBook {
        title: "Guards! Guards!",
        author: 2,
        genres: &[1, 2],
        isbn: "9780062225757",
        summary: "The Night Watch of Ankh-Morpork faces a dragon summoned by a secret society.",
        copies: &[
            ("Gollancz, 1989", "available"),
            ("Harper, 2013", "unavailable"),
        ],
    },
];

/// Load a small fixed catalog through the regular store operations.
///
/// Every row goes through the same validation as client writes.
pub fn seed_sample_data(store: &CatalogStore) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    let mut author_ids = Vec::with_capacity(AUTHORS.len());
    for (first_name, last_name, birth_date, death_date) in AUTHORS {
        let author = store.create_author(AuthorInput {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            birth_date: Some(birth_date.to_string()),
            death_date: death_date.map(str::to_string),
        })?;
        author_ids.push(author.id);
        report.authors += 1;
    }

    let mut genre_ids = Vec::with_capacity(GENRES.len());
    for name in GENRES {
        let genre = store.create_genre(GenreInput {
            name: Some(name.to_string()),
        })?;
        genre_ids.push(genre.id);
        report.genres += 1;
    }

    for sample in BOOKS {
        let book = store.create_book(BookInput {
            title: Some(sample.title.to_string()),
            author_ids: Some(vec![author_ids[sample.author].clone()]),
            genre_ids: Some(sample.genres.iter().map(|&g| genre_ids[g].clone()).collect()),
            isbn: Some(sample.isbn.to_string()),
            summary: Some(sample.summary.to_string()),
        })?;
        report.books += 1;

        for (imprint, status) in sample.copies {
            store.create_copy(BookCopyInput {
                book_id: Some(book.id.clone()),
                imprint: Some(imprint.to_string()),
                status: Some(status.to_string()),
                due_back_date: None,
            })?;
            report.copies += 1;
        }
    }

    tracing::info!(
        authors = report.authors,
        genres = report.genres,
        books = report.books,
        copies = report.copies,
        "sample catalog loaded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_every_table() {
        let store = CatalogStore::new();
        let report = seed_sample_data(&store).unwrap();

        assert_eq!(report, store.counts());
        assert_eq!(report.authors, 3);
        assert_eq!(report.genres, 3);
        assert_eq!(report.books, 3);
        assert_eq!(report.copies, 5);
    }
}
