//! BookStore trait definition.

use crate::book_store::{BookRecord, LibraryStats};
use crate::error::LibraryResult;

/// Trait for book storage backends.
///
/// The command router only talks to this trait, so tests can swap in an
/// in-memory implementation without touching SQLite.
pub trait BookStore: Send + Sync {
    /// Insert a fully populated record.
    fn insert(&self, record: &BookRecord) -> LibraryResult<()>;

    /// All records in insertion order.
    fn list_all(&self) -> LibraryResult<Vec<BookRecord>>;

    /// Records whose title or author contains `query`, case-insensitively.
    /// An empty query matches everything.
    fn search(&self, query: &str) -> LibraryResult<Vec<BookRecord>>;

    /// Get a record by ID.
    fn get(&self, id: &str) -> LibraryResult<Option<BookRecord>>;

    /// Delete a record by ID. Deleting an unknown ID is not an error.
    fn remove(&self, id: &str) -> LibraryResult<()>;

    /// Number of records in the store.
    fn count(&self) -> LibraryResult<usize>;

    /// Aggregate figures for the overview screen.
    fn stats(&self) -> LibraryResult<LibraryStats>;
}
