//! Book content resolution for downloads.
//!
//! Books with a stored file are served from disk. Books without one get
//! synthesized placeholder text, so a download request always produces
//! content.

use std::fs;
use std::path::Path;
use tracing::warn;

const EXCERPT_PHILOSOPHERS_STONE: &str = "\
HARRY POTTER AND THE PHILOSOPHER'S STONE
by J.K. Rowling

Chapter One: The Boy Who Lived

Mr. and Mrs. Dursley, of number four, Privet Drive, were proud to say that they were perfectly normal, thank you very much. They were the last people you'd expect to be involved in anything strange or mysterious, because they just didn't hold with such nonsense.

Mr. Dursley was the director of a firm called Grunnings, which made drills. He was a big, beefy man with hardly any neck, although he did have a very large mustache. Mrs. Dursley was thin and blonde and had nearly twice the usual amount of neck, which came in very useful as she spent so much of her time craning over garden fences, spying on the neighbors.

This is a sample of the book content for demonstration purposes.
";

const EXCERPT_MOCKINGBIRD: &str = "\
TO KILL A MOCKINGBIRD
by Harper Lee

Chapter 1

When he was nearly thirteen, my brother Jem got his arm badly broken at the elbow. When it healed, and Jem's fears of never being able to play football were assuaged, he was seldom self-conscious about his injury. His left arm was somewhat shorter than his right; when he stood or walked, the back of his hand was at right angles to his body, his thumb parallel to his thigh.

This is a sample of the book content for demonstration purposes.
";

const EXCERPT_NINETEEN_EIGHTY_FOUR: &str = "\
1984
by George Orwell

Part One

Chapter 1

It was a bright cold day in April, and the clocks were striking thirteen. Winston Smith, his chin nuzzled into his breast in an effort to escape the vile wind, slipped quickly through the glass doors of Victory Mansions, though not quickly enough to prevent a swirl of gritty dust from entering along with him.

This is a sample of the book content for demonstration purposes.
";

/// Downloadable content with the extension to tag it with.
#[derive(Debug)]
pub struct BookContent {
    pub data: Vec<u8>,
    /// Includes the leading dot, or "" when the source file had none.
    pub extension: String,
}

impl BookContent {
    /// The file name to offer the download under.
    pub fn download_name(&self, title: &str) -> String {
        format!("{}{}", title, self.extension)
    }
}

/// Resolve the downloadable content for a book.
///
/// Reads the stored file when `file_path` points at one; otherwise falls
/// back to placeholder text tagged `.txt`. Never fails.
pub fn resolve_download(file_path: &str, title: &str) -> BookContent {
    if !file_path.is_empty() {
        match fs::read(file_path) {
            Ok(data) => {
                let extension = Path::new(file_path)
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default();
                return BookContent { data, extension };
            }
            Err(e) => {
                warn!("Could not read stored file {}: {}", file_path, e);
            }
        }
    }

    BookContent {
        data: sample_text(title).into_bytes(),
        extension: ".txt".to_string(),
    }
}

fn sample_text(title: &str) -> String {
    match title {
        "Harry Potter and the Philosopher's Stone" => EXCERPT_PHILOSOPHERS_STONE.to_string(),
        "To Kill a Mockingbird" => EXCERPT_MOCKINGBIRD.to_string(),
        "1984" => EXCERPT_NINETEEN_EIGHTY_FOUR.to_string(),
        _ => format!(
            "{}\n\nThis is a sample preview of the book. In an actual implementation, this would contain the full text or a protected PDF version of the book.\n\nThis file is a placeholder for demonstration purposes only.\n",
            title
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_title_without_file_gets_fixed_excerpt() {
        let content = resolve_download("", "1984");
        assert_eq!(content.extension, ".txt");
        let text = String::from_utf8(content.data).unwrap();
        assert!(text.starts_with("1984\nby George Orwell"));
        assert!(text.contains("Winston Smith"));
        assert!(text.contains("This is a sample of the book content for demonstration purposes."));
    }

    #[test]
    fn test_each_sample_title_has_its_own_excerpt() {
        let harry = resolve_download("", "Harry Potter and the Philosopher's Stone");
        assert!(String::from_utf8(harry.data)
            .unwrap()
            .contains("The Boy Who Lived"));

        let mockingbird = resolve_download("", "To Kill a Mockingbird");
        assert!(String::from_utf8(mockingbird.data)
            .unwrap()
            .contains("my brother Jem"));
    }

    #[test]
    fn test_unknown_title_without_file_gets_generic_preview() {
        let content = resolve_download("", "Dune");
        assert_eq!(content.extension, ".txt");
        let text = String::from_utf8(content.data.clone()).unwrap();
        assert!(text.starts_with("Dune\n"));
        assert!(text.contains("This is a sample preview of the book."));
        assert_eq!(content.download_name("Dune"), "Dune.txt");
    }

    #[test]
    fn test_existing_file_is_served_with_its_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dune.pdf");
        std::fs::write(&path, b"%PDF-1.4 fake").unwrap();

        let content = resolve_download(path.to_str().unwrap(), "Dune");
        assert_eq!(content.data, b"%PDF-1.4 fake");
        assert_eq!(content.extension, ".pdf");
        assert_eq!(content.download_name("Dune"), "Dune.pdf");
    }

    #[test]
    fn test_file_without_extension_keeps_bare_title() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dune");
        std::fs::write(&path, b"plain bytes").unwrap();

        let content = resolve_download(path.to_str().unwrap(), "Dune");
        assert_eq!(content.extension, "");
        assert_eq!(content.download_name("Dune"), "Dune");
    }

    #[test]
    fn test_unreadable_path_falls_back_to_placeholder() {
        let content = resolve_download("/no/such/file.pdf", "1984");
        assert_eq!(content.extension, ".txt");
        assert!(String::from_utf8(content.data)
            .unwrap()
            .contains("Winston Smith"));
    }
}
