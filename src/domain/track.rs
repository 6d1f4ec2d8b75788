use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::TrackId;

/// Represent a stored music track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// minutes
    pub duration: Option<i64>,
    pub release_year: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Every track column except the id, as sent on create.
///
/// Absent fields are stored as NULL. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub release_year: Option<i64>,
}

/// Partial update of a track.
///
/// Each field is `None` when the key is absent (column untouched),
/// `Some(None)` when sent as `null` (column cleared) and `Some(Some(v))` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub artist: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub album: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub release_year: Option<Option<i64>>,
}

/// Only called for keys that are present, so a `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
