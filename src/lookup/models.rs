//! Models for the Open Library search API response.
//!
//! These types match the JSON structure returned by `search.json` and
//! include the conversion into catalog drafts.

use crate::book_store::{placeholder_cover, BookDraft};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// A single search result document. Almost everything is optional; the
/// API omits fields it has no data for rather than sending null.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    pub publisher: Option<Vec<String>>,
    pub first_publish_year: Option<i64>,
    pub isbn: Option<Vec<String>>,
    pub cover_i: Option<i64>,
}

impl SearchDoc {
    /// Convert a search result into an unsaved draft, filling every gap
    /// with a fixed fallback value.
    pub fn into_draft(self) -> BookDraft {
        let author = if self.author_name.is_empty() {
            "Unknown Author".to_string()
        } else {
            self.author_name.join(", ")
        };

        let genre = if self.subject.is_empty() {
            "Unspecified".to_string()
        } else {
            self.subject
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        // A missing publisher list falls back to a name, an empty one to "".
        let publisher = match &self.publisher {
            None => "Unknown Publisher".to_string(),
            Some(names) => names.first().cloned().unwrap_or_default(),
        };
        let description = format!("A book by {}. Published by {}.", author, publisher);

        let isbn = match &self.isbn {
            None => "Unknown".to_string(),
            Some(numbers) => numbers.join(", "),
        };

        let cover_image = match self.cover_i {
            Some(id) if id != 0 => format!("https://covers.openlibrary.org/b/id/{}-M.jpg", id),
            _ => placeholder_cover(self.title.as_deref().unwrap_or("Book")),
        };

        BookDraft {
            title: self
                .title
                .unwrap_or_else(|| "Unknown Title".to_string()),
            author,
            genre: Some(genre),
            description: Some(description),
            published_year: self.first_publish_year.unwrap_or(2000),
            isbn: Some(isbn),
            cover_image: Some(cover_image),
            file_path: String::new(),
        }
    }
}
