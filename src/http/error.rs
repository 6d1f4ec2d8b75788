use rouille::Response;
use serde::{Deserialize, Serialize};

use crate::storage::error::StorageError;

pub const NOT_FOUND_MESSAGE: &str = "No tracks found";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const INVALID_ID_MESSAGE: &str = "Invalid track id";

#[derive(Debug)]
pub enum ApiError {
    NotFound { error: String },
    RouteNotFound { error: String },
    BadRequest { message: String, error: String },
    Internal { message: String, error: String },
}

/// JSON body of every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub message: String,
    pub error: String,
}

impl ApiError {
    /// Maps a storage failure to its response, `context` being the text used for 500s.
    pub fn from_storage(err: StorageError, context: &str) -> Self {
        log::error!("{context}: {err}");

        if err.is_not_found() {
            ApiError::NotFound {
                error: err.to_string(),
            }
        } else {
            ApiError::Internal {
                message: context.to_string(),
                error: err.to_string(),
            }
        }
    }

    pub fn invalid_body(err: impl std::fmt::Display) -> Self {
        log::warn!("{INVALID_BODY_MESSAGE}: {err}");
        ApiError::BadRequest {
            message: INVALID_BODY_MESSAGE.into(),
            error: err.to_string(),
        }
    }

    pub fn invalid_id(err: impl std::fmt::Display) -> Self {
        log::warn!("{INVALID_ID_MESSAGE}: {err}");
        ApiError::BadRequest {
            message: INVALID_ID_MESSAGE.into(),
            error: err.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound { .. } | ApiError::RouteNotFound { .. } => 404,
            ApiError::BadRequest { .. } => 400,
            ApiError::Internal { .. } => 500,
        }
    }

    pub fn into_envelope(self) -> ErrorEnvelope {
        let code = self.status_code();
        let (message, error) = match self {
            ApiError::NotFound { error } => (NOT_FOUND_MESSAGE.to_string(), error),
            ApiError::RouteNotFound { error } => ("Route not found".to_string(), error),
            ApiError::BadRequest { message, error } | ApiError::Internal { message, error } => {
                (message, error)
            }
        };
        ErrorEnvelope {
            code,
            message,
            error,
        }
    }

    pub fn into_response(self) -> Response {
        let envelope = self.into_envelope();
        Response::json(&envelope).with_status_code(envelope.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::TrackId;

    #[test]
    fn test_not_found_kinds_map_to_404() {
        for err in [StorageError::NoTracks, StorageError::TrackNotFound(TrackId(11))] {
            let api = ApiError::from_storage(err, "Error in deleting track");
            assert_eq!(api.status_code(), 404);

            let envelope = api.into_envelope();
            assert_eq!(envelope.code, 404);
            assert_eq!(envelope.message, NOT_FOUND_MESSAGE);
        }
    }

    #[test]
    fn test_store_failures_map_to_500_with_context() {
        let err = StorageError::Database(rusqlite::Error::InvalidQuery);

        let envelope = ApiError::from_storage(err, "Error in updating track").into_envelope();

        assert_eq!(envelope.code, 500);
        assert_eq!(envelope.message, "Error in updating track");
        assert!(envelope.error.starts_with("database error"));
    }

    #[test]
    fn test_internal_error_defaults_to_500() {
        let err = StorageError::Internal(anyhow::anyhow!("lock poisoned"));

        let api = ApiError::from_storage(err, "Error in fetching all tracks");

        assert_eq!(api.status_code(), 500);
    }

    #[test]
    fn test_bad_request_envelope() {
        let envelope = ApiError::invalid_id("abc").into_envelope();

        assert_eq!(envelope.code, 400);
        assert_eq!(envelope.message, INVALID_ID_MESSAGE);
        assert_eq!(envelope.error, "abc");
    }
}
