//! Command router connecting the store, the lookup client and content
//! retrieval.
//!
//! Every user action is a `LibraryCommand`; the router executes it against
//! the backends and returns a `CommandOutcome` for the caller to render.
//! Failed lookups are downgraded to an empty candidate list with a note,
//! everything else surfaces as a `LibraryError`.

use crate::book_store::{validate_new_book, BookDraft, BookRecord, BookStore, LibraryStats};
use crate::content::{resolve_download, store_upload, BookContent};
use crate::error::{LibraryError, LibraryResult};
use crate::lookup::CatalogLookup;
use std::path::PathBuf;

/// User-supplied fields for a manually added book.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub published_year: i64,
    pub isbn: Option<String>,
    pub cover_image: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum LibraryCommand {
    /// Aggregate figures plus the most recent additions.
    Stats,
    /// Every book in the library.
    List,
    /// Books whose title or author contains the query.
    Search { query: String },
    /// Query the external catalog, optionally saving one result
    /// (1-based index into the returned list).
    Lookup { query: String, save: Option<usize> },
    /// Add a book with user-supplied fields.
    Add(NewBook),
    /// Remove a book by id.
    Remove { id: String },
    /// Resolve the downloadable content of a book.
    Download { id: String },
}

#[derive(Debug)]
pub enum CommandOutcome {
    Overview(LibraryStats),
    BookList(Vec<BookRecord>),
    /// Lookup results. `note` carries the reported error when the lookup
    /// failed; the list is empty in that case.
    Candidates {
        drafts: Vec<BookDraft>,
        note: Option<String>,
    },
    /// A record that was just persisted.
    Saved(BookRecord),
    Info(String),
    /// Downloadable bytes and the file name to offer them under.
    Content {
        file_name: String,
        content: BookContent,
    },
}

pub struct Router {
    store: Box<dyn BookStore>,
    lookup: Box<dyn CatalogLookup>,
    uploads_dir: PathBuf,
}

impl Router {
    pub fn new(
        store: Box<dyn BookStore>,
        lookup: Box<dyn CatalogLookup>,
        uploads_dir: PathBuf,
    ) -> Self {
        Self {
            store,
            lookup,
            uploads_dir,
        }
    }

    pub fn dispatch(&self, command: LibraryCommand) -> LibraryResult<CommandOutcome> {
        match command {
            LibraryCommand::Stats => Ok(CommandOutcome::Overview(self.store.stats()?)),
            LibraryCommand::List => Ok(CommandOutcome::BookList(self.store.list_all()?)),
            LibraryCommand::Search { query } => {
                Ok(CommandOutcome::BookList(self.store.search(&query)?))
            }
            LibraryCommand::Lookup { query, save } => self.lookup_and_maybe_save(&query, save),
            LibraryCommand::Add(new_book) => self.add(new_book),
            LibraryCommand::Remove { id } => match self.store.get(&id)? {
                Some(_) => {
                    self.store.remove(&id)?;
                    Ok(CommandOutcome::Info("Book deleted successfully!".to_string()))
                }
                None => Ok(CommandOutcome::Info(format!("No book found with id {}", id))),
            },
            LibraryCommand::Download { id } => {
                let record = self.store.get(&id)?.ok_or_else(|| {
                    LibraryError::Validation(format!("No book found with id {}", id))
                })?;
                let content = resolve_download(&record.file_path, &record.title);
                let file_name = content.download_name(&record.title);
                Ok(CommandOutcome::Content { file_name, content })
            }
        }
    }

    fn lookup_and_maybe_save(
        &self,
        query: &str,
        save: Option<usize>,
    ) -> LibraryResult<CommandOutcome> {
        let drafts = match self.lookup.search_catalog(query) {
            Ok(drafts) => drafts,
            Err(e) => {
                return Ok(CommandOutcome::Candidates {
                    drafts: Vec::new(),
                    note: Some(e.to_string()),
                })
            }
        };

        match save {
            None => Ok(CommandOutcome::Candidates { drafts, note: None }),
            Some(number) => {
                let draft = number
                    .checked_sub(1)
                    .and_then(|index| drafts.get(index))
                    .ok_or_else(|| {
                        LibraryError::Validation(format!(
                            "No result number {} to save, the lookup returned {} result(s).",
                            number,
                            drafts.len()
                        ))
                    })?;
                let record = draft.clone().into_record();
                self.store.insert(&record)?;
                Ok(CommandOutcome::Saved(record))
            }
        }
    }

    fn add(&self, new_book: NewBook) -> LibraryResult<CommandOutcome> {
        validate_new_book(&new_book.title, &new_book.author, new_book.published_year)?;

        let file_path = match &new_book.file {
            Some(source) => store_upload(&self.uploads_dir, source)?,
            None => String::new(),
        };

        let record = BookDraft {
            title: new_book.title,
            author: new_book.author,
            genre: new_book.genre,
            description: new_book.description,
            published_year: new_book.published_year,
            isbn: new_book.isbn,
            cover_image: new_book.cover_image,
            file_path,
        }
        .into_record();

        self.store.insert(&record)?;
        Ok(CommandOutcome::Saved(record))
    }
}
