use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, ToSql, params};
use serde::{Deserialize, Serialize};

use crate::{
    config,
    domain::{
        id::TrackId,
        track::{Track, TrackFields, TrackPatch},
    },
    storage::{
        db,
        error::StorageError,
        schema::{self, columns, tables},
    },
};

use columns::*;
use tables::*;

pub const UPDATED_MESSAGE: &str = "Track updated successfully";
pub const DELETED_MESSAGE: &str = "Track record deleted successfully";

/// Result of a successful update, returned to clients unchanged
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackUpdate {
    pub message: String,
    #[serde(rename = "updatedTrack")]
    pub updated_track: Track,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackDeletion {
    pub message: String,
}

/// Accessor for the tracks table.
///
/// Holds no cached rows: every call goes to the database.
pub struct TrackRepository {
    pub(crate) db: rusqlite::Connection,
}

fn select_tracks() -> String {
    format!("SELECT {} FROM {TRACKS}", TRACK_COLUMNS.join(", "))
}

fn track_from_row(row: &Row<'_>) -> rusqlite::Result<Track> {
    Ok(Track {
        id: TrackId(row.get(0)?),
        name: row.get(1)?,
        artist: row.get(2)?,
        album: row.get(3)?,
        genre: row.get(4)?,
        duration: row.get(5)?,
        release_year: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Column/value pairs for the keys present in `patch`; a `null` value clears the column
fn assignments(patch: &TrackPatch) -> Vec<(&'static str, &dyn ToSql)> {
    let mut out: Vec<(&'static str, &dyn ToSql)> = Vec::new();
    if let Some(v) = &patch.name {
        out.push((NAME, v as &dyn ToSql));
    }
    if let Some(v) = &patch.artist {
        out.push((ARTIST, v as &dyn ToSql));
    }
    if let Some(v) = &patch.album {
        out.push((ALBUM, v as &dyn ToSql));
    }
    if let Some(v) = &patch.genre {
        out.push((GENRE, v as &dyn ToSql));
    }
    if let Some(v) = &patch.duration {
        out.push((DURATION, v as &dyn ToSql));
    }
    if let Some(v) = &patch.release_year {
        out.push((RELEASE_YEAR, v as &dyn ToSql));
    }
    out
}

fn insert_sql() -> String {
    format!(
        "INSERT INTO {TRACKS} ({NAME}, {ARTIST}, {ALBUM}, {GENRE}, {DURATION}, {RELEASE_YEAR}, {CREATED_AT}, {UPDATED_AT})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)"
    )
}

fn insert_params<'a>(fields: &'a TrackFields, now: &'a DateTime<Utc>) -> [&'a dyn ToSql; 7] {
    [
        &fields.name,
        &fields.artist,
        &fields.album,
        &fields.genre,
        &fields.duration,
        &fields.release_year,
        now,
    ]
}

impl TrackRepository {
    /// Opens the configured database and creates the tracks table if missing.
    pub fn new(db_config: &config::Database) -> Result<Self, StorageError> {
        let db = db::open(db_config)?;
        Ok(Self::from_existing_conn(db))
    }

    /// The connection must already carry the schema, see `db::open`.
    pub fn from_existing_conn(db: rusqlite::Connection) -> Self {
        Self { db }
    }

    /// Destroys all stored tracks and loads `rows` instead.
    ///
    /// Returns the number of inserted rows.
    pub fn seed(&mut self, rows: &[TrackFields]) -> Result<usize, StorageError> {
        let now = Utc::now();
        let tx = self.db.transaction()?;

        schema::recreate(&tx)?;
        {
            let mut stmt = tx.prepare(&insert_sql())?;
            for row in rows {
                stmt.execute(insert_params(row, &now).as_slice())?;
            }
        }

        tx.commit()?;
        log::info!("database seeded with {} tracks", rows.len());
        Ok(rows.len())
    }

    /// All stored tracks, in id order.
    ///
    /// An empty table is reported as `StorageError::NoTracks`.
    pub fn list_all(&self) -> Result<Vec<Track>, StorageError> {
        let mut stmt = self.db.prepare(&format!("{} ORDER BY {ID}", select_tracks()))?;
        let tracks = stmt
            .query_map([], track_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        if tracks.is_empty() {
            return Err(StorageError::NoTracks);
        }
        Ok(tracks)
    }

    pub fn find_by_id(&self, id: TrackId) -> Result<Track, StorageError> {
        self.db
            .query_row(
                &format!("{} WHERE {ID} = ?1", select_tracks()),
                params![id.0],
                track_from_row,
            )
            .optional()?
            .ok_or(StorageError::TrackNotFound(id))
    }

    /// Inserts one track and returns it as stored, with its new id.
    pub fn create(&self, fields: &TrackFields) -> Result<Track, StorageError> {
        let now = Utc::now();
        self.db
            .execute(&insert_sql(), insert_params(fields, &now).as_slice())?;

        let id = TrackId(self.db.last_insert_rowid());
        let track = self.find_by_id(id)?;
        log::debug!("created track {id}");
        Ok(track)
    }

    /// Writes the columns present in `patch` on track `id`, leaving the others untouched.
    ///
    /// Not an upsert: a missing row is `StorageError::TrackNotFound`.
    pub fn update_by_id(
        &self,
        id: TrackId,
        patch: &TrackPatch,
    ) -> Result<TrackUpdate, StorageError> {
        let now = Utc::now();

        let mut set = vec![format!("{UPDATED_AT} = ?1")];
        let mut values: Vec<&dyn ToSql> = vec![&now];
        for (column, value) in assignments(patch) {
            values.push(value);
            set.push(format!("{column} = ?{}", values.len()));
        }
        if set.len() == 1 {
            log::debug!("update of track {id} carries no fields, only touching {UPDATED_AT}");
        }
        values.push(&id.0);

        let sql = format!(
            "UPDATE {TRACKS} SET {} WHERE {ID} = ?{}",
            set.join(", "),
            values.len()
        );
        let changed = self.db.execute(&sql, values.as_slice())?;
        if changed == 0 {
            return Err(StorageError::TrackNotFound(id));
        }

        Ok(TrackUpdate {
            message: UPDATED_MESSAGE.to_string(),
            updated_track: self.find_by_id(id)?,
        })
    }

    pub fn delete_by_id(&self, id: TrackId) -> Result<TrackDeletion, StorageError> {
        let changed = self
            .db
            .execute(&format!("DELETE FROM {TRACKS} WHERE {ID} = ?1"), params![id.0])?;
        if changed == 0 {
            return Err(StorageError::TrackNotFound(id));
        }

        log::debug!("deleted track {id}");
        Ok(TrackDeletion {
            message: DELETED_MESSAGE.to_string(),
        })
    }
}
