use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents the track ID.
///
/// Assigned by the store on insert and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub i64);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid track id: {0:?}")]
pub struct InvalidTrackId(pub String);

impl TrackId {
    /// Parses a decimal id as found in a path segment or a JSON string.
    pub fn parse(raw: &str) -> Result<Self, InvalidTrackId> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidTrackId(raw.to_string()))
    }
}

impl Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(TrackId::parse("11"), Ok(TrackId(11)));
        assert_eq!(TrackId::parse(" 7 "), Ok(TrackId(7)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TrackId::parse("abc").is_err());
        assert!(TrackId::parse("11abc").is_err());
        assert!(TrackId::parse("").is_err());
        assert!(TrackId::parse("1.5").is_err());
    }

    #[test]
    fn test_serializes_as_bare_integer() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&TrackId(42))?, "42");
        Ok(())
    }
}
