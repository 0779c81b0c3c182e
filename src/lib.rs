//! Libreria Book Catalog Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod book_store;
pub mod config;
pub mod content;
pub mod error;
pub mod lookup;
pub mod router;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use book_store::{BookDraft, BookRecord, BookStore, LibraryStats, SqliteBookStore};
pub use error::{LibraryError, LibraryResult};
pub use lookup::{CatalogLookup, OpenLibraryClient};
pub use router::{CommandOutcome, LibraryCommand, NewBook, Router};
