//! Input-boundary validation for new book entries.
//!
//! These checks run before anything reaches the store; the store itself
//! only enforces the schema constraints.

use crate::error::{LibraryError, LibraryResult};
use chrono::{Datelike, Local};

/// Validate the user-supplied fields of a new entry.
///
/// Title and author must be non-empty and the published year must fall
/// in `0..=current year`.
pub fn validate_new_book(title: &str, author: &str, published_year: i64) -> LibraryResult<()> {
    if title.is_empty() || author.is_empty() {
        return Err(LibraryError::Validation(
            "Title and author are required fields.".to_string(),
        ));
    }
    let current_year = Local::now().year() as i64;
    if published_year < 0 || published_year > current_year {
        return Err(LibraryError::Validation(format!(
            "Published year must be between 0 and {}.",
            current_year
        )));
    }
    Ok(())
}
