mod retrieval;
mod uploads;

pub use retrieval::{resolve_download, BookContent};
pub use uploads::store_upload;
