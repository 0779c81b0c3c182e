//! SQLite-backed book store implementation.
//!
//! A single long-lived connection behind a mutex serves both reads and
//! writes, so every read observes all previously committed writes.

use super::models::{BookDraft, BookRecord, LibraryStats};
use super::schema::BOOKS_VERSIONED_SCHEMAS;
use super::trait_def::BookStore;
use crate::error::LibraryResult;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Column list shared by every SELECT so rows always parse the same way.
const BOOK_COLUMNS: &str =
    "id, title, author, genre, description, published_year, isbn, cover_image, date_added, file_path";

struct SampleBook {
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    description: &'static str,
    published_year: i64,
    isbn: &'static str,
    cover_image: &'static str,
}

const SAMPLE_BOOKS: [SampleBook; 3] = [
    SampleBook {
        title: "Harry Potter and the Philosopher's Stone",
        author: "J.K. Rowling",
        genre: "Fantasy",
        description: "The first book in the Harry Potter series.",
        published_year: 1997,
        isbn: "9780590353427",
        cover_image: "https://via.placeholder.com/150?text=Harry+Potter",
    },
    SampleBook {
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        genre: "Fiction",
        description: "A story about racial injustice and loss of innocence in the American South.",
        published_year: 1960,
        isbn: "9780061120084",
        cover_image: "https://via.placeholder.com/150?text=To+Kill+a+Mockingbird",
    },
    SampleBook {
        title: "1984",
        author: "George Orwell",
        genre: "Science Fiction",
        description: "A dystopian novel about totalitarianism and mass surveillance.",
        published_year: 1949,
        isbn: "9780451524935",
        cover_image: "https://via.placeholder.com/150?text=1984",
    },
];

/// SQLite-backed book store.
#[derive(Clone, Debug)]
pub struct SqliteBookStore {
    conn: Arc<Mutex<Connection>>,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = BOOKS_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &BOOKS_VERSIONED_SCHEMAS[latest_version];

    // Check if this is a brand new database (no tables exist)
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        // Brand new database - create the latest schema directly
        info!("Creating library db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    // Handle databases created before schema versioning (user_version = 0).
    // These are classified by which columns exist.
    let mut current_version = if db_version < BASE_DB_VERSION as i64 {
        let has_file_path = conn
            .query_row(
                "SELECT 1 FROM pragma_table_info('books') WHERE name = 'file_path'",
                [],
                |r| r.get::<_, i32>(0),
            )
            .ok()
            == Some(1);

        if has_file_path {
            1 // Has the v1 column, treat as v1
        } else {
            0 // Legacy database at v0
        }
    } else {
        (db_version - BASE_DB_VERSION as i64) as usize
    };

    if current_version > latest_version {
        bail!(
            "Library db is at schema version {} but this build only supports up to {}",
            current_version,
            latest_version
        );
    }
    if current_version == latest_version {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for schema in BOOKS_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating library db from version {} to {}",
                current_version, schema.version
            );
            migration_fn(&tx)?;
            current_version = schema.version;
        }
    }
    tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
    tx.commit()?;
    Ok(())
}

/// Repopulates the store with the fixed sample set when it holds fewer than
/// 3 records. Note that this deletes any 1 or 2 records already present;
/// see DESIGN.md before changing it.
fn seed_if_sparse(conn: &mut Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))?;
    if count >= SAMPLE_BOOKS.len() as i64 {
        return Ok(());
    }

    info!(
        "Found {} books, reseeding with the {} samples",
        count,
        SAMPLE_BOOKS.len()
    );
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM books", [])?;
    for sample in SAMPLE_BOOKS.iter() {
        let record = BookDraft {
            title: sample.title.to_string(),
            author: sample.author.to_string(),
            genre: Some(sample.genre.to_string()),
            description: Some(sample.description.to_string()),
            published_year: sample.published_year,
            isbn: Some(sample.isbn.to_string()),
            cover_image: Some(sample.cover_image.to_string()),
            file_path: String::new(),
        }
        .into_record();
        insert_record(&tx, &record)?;
    }
    tx.commit()?;
    Ok(())
}

fn insert_record(conn: &Connection, record: &BookRecord) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO books (id, title, author, genre, description, published_year, isbn, cover_image, date_added, file_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.id,
            record.title,
            record.author,
            record.genre,
            record.description,
            record.published_year,
            record.isbn,
            record.cover_image,
            record.date_added,
            record.file_path,
        ],
    )
}

impl SqliteBookStore {
    /// Open (or create) the library database at `db_path`.
    ///
    /// Runs any pending schema migrations, validates the resulting schema
    /// and reseeds the sample books when the store is near empty.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let mut conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open library database")?;

        migrate_if_needed(&mut conn)?;

        BOOKS_VERSIONED_SCHEMAS[BOOKS_VERSIONED_SCHEMAS.len() - 1]
            .validate(&conn)
            .context("Library db schema validation failed")?;

        seed_if_sparse(&mut conn)?;

        let book_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))
            .unwrap_or(0);
        info!("Opened library db: {} books", book_count);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Parse a BookRecord from a row in BOOK_COLUMNS order. Columns written
    /// by older tooling can be NULL and fall back to the model defaults.
    fn parse_book_row(row: &rusqlite::Row) -> rusqlite::Result<BookRecord> {
        Ok(BookRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            genre: row.get(3)?,
            description: row.get(4)?,
            published_year: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
            isbn: row.get(6)?,
            cover_image: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            date_added: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            file_path: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
        })
    }
}

impl BookStore for SqliteBookStore {
    fn insert(&self, record: &BookRecord) -> LibraryResult<()> {
        let conn = self.conn.lock().unwrap();
        insert_record(&conn, record)?;
        Ok(())
    }

    fn list_all(&self) -> LibraryResult<Vec<BookRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM books ORDER BY rowid",
            BOOK_COLUMNS
        ))?;
        let records = stmt
            .query_map([], Self::parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn search(&self, query: &str) -> LibraryResult<Vec<BookRecord>> {
        let conn = self.conn.lock().unwrap();
        let pattern = format!("%{}%", query);
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM books WHERE title LIKE ?1 OR author LIKE ?1 ORDER BY rowid",
            BOOK_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![pattern], Self::parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn get(&self, id: &str) -> LibraryResult<Option<BookRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM books WHERE id = ?1",
            BOOK_COLUMNS
        ))?;
        match stmt.query_row(params![id], Self::parse_book_row) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, id: &str) -> LibraryResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn count(&self) -> LibraryResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    fn stats(&self) -> LibraryResult<LibraryStats> {
        let conn = self.conn.lock().unwrap();
        let total_books: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))?;
        let total_authors: i64 =
            conn.query_row("SELECT COUNT(DISTINCT author) FROM books", [], |r| r.get(0))?;

        let most_common_genre = match conn.query_row(
            "SELECT genre FROM books WHERE genre IS NOT NULL AND genre != ''
             GROUP BY genre ORDER BY COUNT(*) DESC LIMIT 1",
            [],
            |r| r.get::<_, String>(0),
        ) {
            Ok(genre) => Some(genre),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };

        // Ties on date_added keep insertion order.
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM books ORDER BY date_added DESC, rowid LIMIT 3",
            BOOK_COLUMNS
        ))?;
        let recent = stmt
            .query_map([], Self::parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LibraryStats {
            total_books: total_books as usize,
            total_authors: total_authors as usize,
            most_common_genre,
            recent,
        })
    }
}
