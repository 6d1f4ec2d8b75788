use thiserror::Error;

use crate::domain::id::TrackId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("No tracks found")]
    NoTracks,

    #[error("track {0} not found")]
    TrackNotFound(TrackId),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl StorageError {
    /// true when the requested rows do not exist, as opposed to a store failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NoTracks | StorageError::TrackNotFound(_))
    }
}
