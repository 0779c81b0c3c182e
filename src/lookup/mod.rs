mod client;
mod models;

pub use client::{CatalogLookup, OpenLibraryClient};
pub use models::{SearchDoc, SearchResponse};
