use thiserror::Error;

/// Failure kinds surfaced to the user. None of these are fatal: the
/// binary reports them and exits, and absence of data (empty store,
/// no matches, missing file) is never modeled as an error.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Input rejected at the boundary, before it reaches the store.
    #[error("{0}")]
    Validation(String),

    /// The book table or backing file storage could not be read or written.
    #[error("Database error: {0}")]
    Persistence(String),

    /// The remote catalog could not be queried or its response parsed.
    /// The message carries the full user-facing text.
    #[error("{0}")]
    Lookup(String),
}

impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        LibraryError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Persistence(err.to_string())
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;
