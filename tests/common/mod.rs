//! Common test infrastructure
//!
//! Provides a temporary library on disk plus a router wired to a stub
//! catalog lookup, so end-to-end tests can drive full command flows
//! without the network.

use libreria::{
    BookDraft, BookRecord, CatalogLookup, CommandOutcome, LibraryCommand, LibraryError,
    LibraryResult, Router, SqliteBookStore,
};
use std::path::PathBuf;
use tempfile::TempDir;

pub const SAMPLE_TITLES: [&str; 3] = [
    "Harry Potter and the Philosopher's Stone",
    "To Kill a Mockingbird",
    "1984",
];

/// Catalog lookup stub returning canned drafts or a canned failure.
pub struct StubLookup {
    pub drafts: Vec<BookDraft>,
    pub error: Option<String>,
}

impl StubLookup {
    pub fn with_drafts(drafts: Vec<BookDraft>) -> Box<Self> {
        Box::new(Self {
            drafts,
            error: None,
        })
    }

    pub fn failing(message: &str) -> Box<Self> {
        Box::new(Self {
            drafts: Vec::new(),
            error: Some(message.to_string()),
        })
    }
}

impl CatalogLookup for StubLookup {
    fn search_catalog(&self, _query: &str) -> LibraryResult<Vec<BookDraft>> {
        match &self.error {
            Some(message) => Err(LibraryError::Lookup(message.clone())),
            None => Ok(self.drafts.clone()),
        }
    }
}

/// A library in a temp directory. Routers created from it share the same
/// database file, so each one models a fresh program run.
pub struct TestLibrary {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
}

impl TestLibrary {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("library.db");
        let uploads_dir = dir.path().join("uploads");
        Self {
            dir,
            db_path,
            uploads_dir,
        }
    }

    /// Open the library as a new program run, with an empty stub lookup.
    pub fn router(&self) -> Router {
        self.router_with_lookup(StubLookup::with_drafts(Vec::new()))
    }

    pub fn router_with_lookup(&self, lookup: Box<dyn CatalogLookup>) -> Router {
        let store = SqliteBookStore::new(&self.db_path).unwrap();
        Router::new(Box::new(store), lookup, self.uploads_dir.clone())
    }
}

pub fn dune_draft() -> BookDraft {
    BookDraft {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        genre: Some("Science Fiction, Deserts".to_string()),
        description: Some("A book by Frank Herbert. Published by Chilton Books.".to_string()),
        published_year: 1965,
        isbn: Some("9780441172719".to_string()),
        cover_image: Some("https://covers.openlibrary.org/b/id/11481354-M.jpg".to_string()),
        file_path: String::new(),
    }
}

/// Dispatch a List command and unwrap the book list.
pub fn list_books(router: &Router) -> Vec<BookRecord> {
    match router.dispatch(LibraryCommand::List).unwrap() {
        CommandOutcome::BookList(books) => books,
        _ => panic!("expected BookList outcome"),
    }
}

/// Dispatch a Search command and unwrap the book list.
pub fn search_books(router: &Router, query: &str) -> Vec<BookRecord> {
    match router
        .dispatch(LibraryCommand::Search {
            query: query.to_string(),
        })
        .unwrap()
    {
        CommandOutcome::BookList(books) => books,
        _ => panic!("expected BookList outcome"),
    }
}
