mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use models::{placeholder_cover, BookDraft, BookRecord, LibraryStats, DATE_FORMAT};
pub use schema::BOOKS_VERSIONED_SCHEMAS;
pub use store::SqliteBookStore;
pub use trait_def::BookStore;
pub use validation::validate_new_book;
