//! Open Library search client.

use super::models::{SearchDoc, SearchResponse};
use crate::book_store::BookDraft;
use crate::error::{LibraryError, LibraryResult};
use anyhow::Result;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Trait for external catalog lookup backends.
///
/// Implementations return unsaved drafts; persisting one is a separate,
/// explicit store insert by the caller.
pub trait CatalogLookup: Send + Sync {
    fn search_catalog(&self, query: &str) -> LibraryResult<Vec<BookDraft>>;
}

pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
    limit: usize,
}

impl OpenLibraryClient {
    /// Create a new Open Library client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://openlibrary.org")
    /// * `timeout_sec` - Request timeout in seconds
    /// * `limit` - Maximum number of results per search
    pub fn new(base_url: &str, timeout_sec: u64, limit: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        })
    }
}

impl CatalogLookup for OpenLibraryClient {
    fn search_catalog(&self, query: &str) -> LibraryResult<Vec<BookDraft>> {
        let url = format!(
            "{}/search.json?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        );
        debug!("Searching catalog: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LibraryError::Lookup(format!("Error connecting to API: {}", e)))?;

        if !response.status().is_success() {
            return Err(LibraryError::Lookup(format!(
                "API Error: {}",
                response.status().as_u16()
            )));
        }

        let body: SearchResponse = response
            .json()
            .map_err(|e| LibraryError::Lookup(format!("Error connecting to API: {}", e)))?;

        Ok(body
            .docs
            .into_iter()
            .take(self.limit)
            .map(SearchDoc::into_draft)
            .collect())
    }
}
