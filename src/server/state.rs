//! Server shared state
//!
//! Holds configuration and the shared handles every request needs.

use crate::auth::{Session, SessionKeys, UserStore};
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::geo::GebetaClient;
use crate::places::PlaceRepository;
use axum::http::{header, HeaderMap};

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    pub db: Database,
    pub places: PlaceRepository,
    pub users: UserStore,
    pub sessions: SessionKeys,

    /// Geocoding and routing provider
    pub provider: GebetaClient,
}

impl AppState {
    /// Create new application state around an open database
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let places = PlaceRepository::new(db.clone(), config.places.placeholder_image.clone());
        let users = UserStore::new(db.clone());
        let sessions = SessionKeys::from_config(&config.auth);
        let provider = GebetaClient::new(&config.provider)?;

        Ok(Self {
            config,
            db,
            places,
            users,
            sessions,
            provider,
        })
    }

    /// Resolve the caller's session from the `Authorization` header
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Session> {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        self.sessions.verify_bearer(value)
    }
}
