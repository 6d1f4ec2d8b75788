use anyhow::anyhow;
use log::info;
use rouille::{Request, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    config::HttpConfig,
    domain::{
        id::TrackId,
        seed::demo_tracks,
        track::{Track, TrackFields, TrackPatch},
    },
    http::error::ApiError,
    storage::{error::StorageError, tracks::TrackRepository},
};

pub const SEEDED_MESSAGE: &str = "Database Seeding successful";

const SEED_CONTEXT: &str = "Error in seeding db";
const LIST_CONTEXT: &str = "Error in fetching all tracks";
const CREATE_CONTEXT: &str = "Error in adding new track";
const UPDATE_CONTEXT: &str = "Error in updating track";
const DELETE_CONTEXT: &str = "Error in deleting track";

pub struct HttpServer {
    storage: Arc<Mutex<TrackRepository>>,
    pub config: HttpConfig,
}

#[derive(Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize, Deserialize)]
struct TracksResponse {
    tracks: Vec<Track>,
}

#[derive(Serialize, Deserialize)]
struct NewTrackBody {
    #[serde(rename = "newTrack")]
    new_track: TrackFields,
}

#[derive(Serialize, Deserialize)]
struct NewTrackResponse {
    #[serde(rename = "newTrack")]
    new_track: Track,
}

/// `id` as sent by clients: a JSON number or a numeric string
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTrackId {
    Number(i64),
    Text(String),
}

impl RawTrackId {
    fn parse(self) -> Result<TrackId, ApiError> {
        match self {
            RawTrackId::Number(n) => Ok(TrackId(n)),
            RawTrackId::Text(s) => TrackId::parse(&s).map_err(ApiError::invalid_id),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct DeleteBody {
    id: RawTrackId,
}

impl HttpServer {
    pub fn new(storage: TrackRepository, config: HttpConfig) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            config,
        }
    }

    pub fn run(self) {
        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        rouille::start_server(addr, move |request| self.handle_request(request));
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = if request.method() == "OPTIONS" {
            Self::handle_preflight()
        } else {
            self.route(request)
        };
        let response = response.with_additional_header("Access-Control-Allow-Origin", "*");

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn route(&self, request: &Request) -> Response {
        let result = rouille::router!(request,
            (GET) (/) => {
                Ok(Response::json(&MessageResponse {
                    message: self.config.banner.clone(),
                }))
            },
            (GET) (/seed_db) => {
                if self.config.enable_seed_route {
                    self.seed_db()
                } else {
                    Err(Self::unknown_route(request))
                }
            },
            (GET) (/tracks) => {
                self.list_tracks()
            },
            (POST) (/tracks/new) => {
                self.add_track(request)
            },
            (POST) (/tracks/update/{id: String}) => {
                self.update_track(&id, request)
            },
            (POST) (/tracks/delete) => {
                self.delete_track(request)
            },
            _ => Err(Self::unknown_route(request))
        );

        result.unwrap_or_else(ApiError::into_response)
    }

    fn log_request(request: &Request) {
        info!("{} {}", request.method(), request.url());
    }

    fn handle_preflight() -> Response {
        Response::empty_204()
            .with_additional_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .with_additional_header("Access-Control-Allow-Headers", "Content-Type")
    }

    fn unknown_route(request: &Request) -> ApiError {
        ApiError::RouteNotFound {
            error: format!("no route for {} {}", request.method(), request.url()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TrackRepository>, StorageError> {
        self.storage.lock().map_err(|e| {
            StorageError::Internal(anyhow!("Could not access track storage under lock: {e}"))
        })
    }

    fn json_body<T: DeserializeOwned>(request: &Request) -> Result<T, ApiError> {
        rouille::input::json_input(request).map_err(ApiError::invalid_body)
    }

    /// Administrative: wipes the table and reloads the demo tracks
    fn seed_db(&self) -> Result<Response, ApiError> {
        let mut storage = self
            .lock()
            .map_err(|e| ApiError::from_storage(e, SEED_CONTEXT))?;
        storage
            .seed(&demo_tracks())
            .map_err(|e| ApiError::from_storage(e, SEED_CONTEXT))?;

        Ok(Response::json(&MessageResponse {
            message: SEEDED_MESSAGE.to_string(),
        }))
    }

    fn list_tracks(&self) -> Result<Response, ApiError> {
        let tracks = self
            .lock()
            .and_then(|storage| storage.list_all())
            .map_err(|e| ApiError::from_storage(e, LIST_CONTEXT))?;

        Ok(Response::json(&TracksResponse { tracks }))
    }

    fn add_track(&self, request: &Request) -> Result<Response, ApiError> {
        let body: NewTrackBody = Self::json_body(request)?;

        let new_track = self
            .lock()
            .and_then(|storage| storage.create(&body.new_track))
            .map_err(|e| ApiError::from_storage(e, CREATE_CONTEXT))?;

        Ok(Response::json(&NewTrackResponse { new_track }))
    }

    fn update_track(&self, id: &str, request: &Request) -> Result<Response, ApiError> {
        let id = TrackId::parse(id).map_err(ApiError::invalid_id)?;
        let patch: TrackPatch = Self::json_body(request)?;

        let update = self
            .lock()
            .and_then(|storage| storage.update_by_id(id, &patch))
            .map_err(|e| ApiError::from_storage(e, UPDATE_CONTEXT))?;

        Ok(Response::json(&update))
    }

    fn delete_track(&self, request: &Request) -> Result<Response, ApiError> {
        let body: DeleteBody = Self::json_body(request)?;
        let id = body.id.parse()?;

        let deletion = self
            .lock()
            .and_then(|storage| storage.delete_by_id(id))
            .map_err(|e| ApiError::from_storage(e, DELETE_CONTEXT))?;

        Ok(Response::json(&deletion))
    }
}

#[cfg(test)]
pub fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: rouille::Response,
) -> anyhow::Result<T> {
    Ok(serde_json::from_reader(
        response.data.into_reader_and_size().0,
    )?)
}
