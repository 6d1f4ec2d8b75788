use rusqlite::Connection;

pub mod tables {
    pub const TRACKS: &str = "tracks";

    pub const ALL_TABLES: &[&str] = &[TRACKS];
}

pub mod columns {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const ARTIST: &str = "artist";
    pub const ALBUM: &str = "album";
    pub const GENRE: &str = "genre";
    pub const DURATION: &str = "duration";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";

    /// In `SELECT` order, matching `Track` field order
    pub const TRACK_COLUMNS: &[&str] = &[
        ID,
        NAME,
        ARTIST,
        ALBUM,
        GENRE,
        DURATION,
        RELEASE_YEAR,
        CREATED_AT,
        UPDATED_AT,
    ];
}

pub use columns::*;
pub use tables::*;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tracks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    artist TEXT,
    album TEXT,
    genre TEXT,
    duration INTEGER,
    release_year INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

const DROP: &str = "DROP TABLE IF EXISTS tracks;";

pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}

/// Drops every table and creates them again, empty.
pub fn recreate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(DROP)?;
    init(conn)
}
