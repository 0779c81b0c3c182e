use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};
use anyhow::Result;
use rusqlite::Connection;

/// V 0
const BOOKS_TABLE_V_0: Table = Table {
    name: "books",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("published_year", &SqlType::Integer),
        sqlite_column!("isbn", &SqlType::Text),
        sqlite_column!("cover_image", &SqlType::Text),
        sqlite_column!("date_added", &SqlType::Text),
    ],
    indices: &[],
};

/// V 1, adds file_path for locally stored content
const BOOKS_TABLE_V_1: Table = Table {
    name: "books",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("published_year", &SqlType::Integer),
        sqlite_column!("isbn", &SqlType::Text),
        sqlite_column!("cover_image", &SqlType::Text),
        sqlite_column!("date_added", &SqlType::Text),
        sqlite_column!("file_path", &SqlType::Text),
    ],
    indices: &[],
};

/// V 2, adds the recency index used by the stats queries
const BOOKS_TABLE_V_2: Table = Table {
    name: "books",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("published_year", &SqlType::Integer),
        sqlite_column!("isbn", &SqlType::Text),
        sqlite_column!("cover_image", &SqlType::Text),
        sqlite_column!("date_added", &SqlType::Text),
        sqlite_column!("file_path", &SqlType::Text),
    ],
    indices: &[("idx_books_date_added", "date_added")],
};

pub const BOOKS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 0,
        tables: &[BOOKS_TABLE_V_0],
        migration: None,
    },
    VersionedSchema {
        version: 1,
        tables: &[BOOKS_TABLE_V_1],
        migration: Some(add_file_path_column),
    },
    VersionedSchema {
        version: 2,
        tables: &[BOOKS_TABLE_V_2],
        migration: Some(add_date_added_index),
    },
];

/// Adds the file_path column when it is not there yet. Existing rows are
/// left untouched (their file_path reads back as NULL, mapped to "").
fn add_file_path_column(conn: &Connection) -> Result<()> {
    let has_file_path = conn
        .query_row(
            "SELECT 1 FROM pragma_table_info('books') WHERE name = 'file_path'",
            [],
            |r| r.get::<_, i32>(0),
        )
        .ok()
        == Some(1);

    if !has_file_path {
        conn.execute("ALTER TABLE books ADD COLUMN file_path TEXT", [])?;
    }
    Ok(())
}

fn add_date_added_index(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_books_date_added ON books(date_added)",
        [],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite_persistence::BASE_DB_VERSION;
    use rusqlite::params;

    /// The CREATE TABLE statement used by pre-versioning tooling.
    const LEGACY_BOOKS_SQL: &str = "CREATE TABLE books
        (id TEXT PRIMARY KEY,
         title TEXT NOT NULL,
         author TEXT NOT NULL,
         genre TEXT,
         description TEXT,
         published_year INTEGER,
         isbn TEXT,
         cover_image TEXT,
         date_added TEXT)";

    #[test]
    fn test_latest_schema_create_then_validate() {
        let conn = Connection::open_in_memory().unwrap();
        let latest = &BOOKS_VERSIONED_SCHEMAS[BOOKS_VERSIONED_SCHEMAS.len() - 1];
        latest.create(&conn).unwrap();
        latest.validate(&conn).unwrap();

        let version: i64 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, (BASE_DB_VERSION + 2) as i64);
    }

    #[test]
    fn test_legacy_table_matches_v0_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(LEGACY_BOOKS_SQL, []).unwrap();
        BOOKS_VERSIONED_SCHEMAS[0].validate(&conn).unwrap();
    }

    #[test]
    fn test_migrations_upgrade_legacy_table_preserving_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(LEGACY_BOOKS_SQL, []).unwrap();
        conn.execute(
            "INSERT INTO books (id, title, author, genre, description, published_year, isbn, cover_image, date_added)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                "id-1",
                "Dune",
                "Frank Herbert",
                "Science Fiction",
                "Desert planet.",
                1965,
                "9780441172719",
                "https://example.com/dune.jpg",
                "2020-01-01 10:00:00",
            ],
        )
        .unwrap();

        add_file_path_column(&conn).unwrap();
        add_date_added_index(&conn).unwrap();

        BOOKS_VERSIONED_SCHEMAS[2].validate(&conn).unwrap();

        let (title, author, year, file_path): (String, String, i64, Option<String>) = conn
            .query_row(
                "SELECT title, author, published_year, file_path FROM books WHERE id = 'id-1'",
                [],
                |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                },
            )
            .unwrap();
        assert_eq!(title, "Dune");
        assert_eq!(author, "Frank Herbert");
        assert_eq!(year, 1965);
        assert_eq!(file_path, None);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(LEGACY_BOOKS_SQL, []).unwrap();

        add_file_path_column(&conn).unwrap();
        add_file_path_column(&conn).unwrap();
        add_date_added_index(&conn).unwrap();
        add_date_added_index(&conn).unwrap();

        let column_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM pragma_table_info('books')", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(column_count, 10);
    }
}
