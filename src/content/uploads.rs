//! Upload storage for book files.

use crate::error::{LibraryError, LibraryResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// Copy `source` into `uploads_dir`, creating the directory if needed.
///
/// The stored file keeps its original name, overwriting any previous
/// upload with the same name. Returns the path to record on the book.
pub fn store_upload(uploads_dir: &Path, source: &Path) -> LibraryResult<String> {
    let file_name = source
        .file_name()
        .ok_or_else(|| LibraryError::Validation(format!("Not a file: {}", source.display())))?;

    fs::create_dir_all(uploads_dir)?;
    let destination = uploads_dir.join(file_name);
    fs::copy(source, &destination)?;
    info!("Stored upload at {}", destination.display());

    Ok(destination.to_string_lossy().into_owned())
}
