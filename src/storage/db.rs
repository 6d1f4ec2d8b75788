use std::path::Path;

use rusqlite::Connection;

use crate::{
    config::Database,
    storage::{error::StorageError, schema},
};

fn open_in_memory() -> Result<rusqlite::Connection, rusqlite::Error> {
    Connection::open_in_memory()
}

fn open_from_file(path: &Path) -> Result<rusqlite::Connection, rusqlite::Error> {
    Connection::open(path)
}

pub fn open(config: &Database) -> Result<rusqlite::Connection, StorageError> {
    let db = if config.in_memory {
        open_in_memory()?
    } else {
        let path = config.file_path();
        log::debug!("opening database at {}", path.to_string_lossy());
        open_from_file(&path)?
    };
    schema::init(&db)?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::{
        config::Database,
        storage::{db::open, schema},
    };

    fn table_names(db: &rusqlite::Connection) -> Vec<String> {
        let mut stmt = db
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();

        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn open_in_memory_db_initializes_schema() {
        let db = open(&Database {
            in_memory: true,
            path: None,
        })
        .unwrap();

        let tables = table_names(&db);
        for table in schema::tables::ALL_TABLES {
            assert!(tables.contains(&table.to_string()));
        }
    }

    #[test]
    fn open_file_db_creates_file_and_schema() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path: PathBuf = dir.path().join("tracks.sqlite");

        let db = open(&Database {
            in_memory: false,
            path: Some(path.clone()),
        })?;

        assert!(path.exists());
        assert!(table_names(&db).contains(&schema::TRACKS.to_string()));

        Ok(())
    }

    #[test]
    fn recreate_empties_table() -> anyhow::Result<()> {
        let db = open(&Database {
            in_memory: true,
            path: None,
        })?;
        db.execute(
            "INSERT INTO tracks (name, created_at, updated_at) VALUES ('x', 'now', 'now')",
            [],
        )?;

        schema::recreate(&db)?;

        let count: i64 = db.query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;
        assert_eq!(count, 0);

        Ok(())
    }
}
