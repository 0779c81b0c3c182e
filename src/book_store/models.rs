//! Book record models.

use chrono::Local;
use uuid::Uuid;

/// Timestamp format used for `date_added`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted book record. Records are immutable once stored: there is
/// no update operation, only insert and remove.
#[derive(Clone, Debug, PartialEq)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub published_year: i64,
    pub isbn: Option<String>,
    pub cover_image: String,
    pub date_added: String,
    /// Path to locally stored content; empty string means "no file".
    pub file_path: String,
}

/// A candidate record that has not been persisted yet, either from
/// manual entry or from a catalog lookup result. Promotion to a
/// `BookRecord` generates the id and the creation timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub published_year: i64,
    pub isbn: Option<String>,
    pub cover_image: Option<String>,
    pub file_path: String,
}

impl BookDraft {
    /// Promote the draft to a full record: fresh UUID, current local
    /// timestamp, and a generated placeholder cover when none was given.
    pub fn into_record(self) -> BookRecord {
        let cover_image = match self.cover_image {
            Some(uri) if !uri.is_empty() => uri,
            _ => placeholder_cover(&self.title),
        };
        BookRecord {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            author: self.author,
            genre: self.genre,
            description: self.description,
            published_year: self.published_year,
            isbn: self.isbn,
            cover_image,
            date_added: Local::now().format(DATE_FORMAT).to_string(),
            file_path: self.file_path,
        }
    }
}

/// Collection summary shown on the overview screen.
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryStats {
    pub total_books: usize,
    pub total_authors: usize,
    pub most_common_genre: Option<String>,
    /// The 3 most recently added records, newest first.
    pub recent: Vec<BookRecord>,
}

/// Cover image URI used when a record has no real cover.
pub fn placeholder_cover(title: &str) -> String {
    format!(
        "https://via.placeholder.com/150?text={}",
        title.replace(' ', "+")
    )
}
