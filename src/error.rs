//! Error types for workspot

use thiserror::Error;

/// Main error type for workspot operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthFailure),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No route found: {0}")]
    NoRoute(String),

    #[error("Your location is required to show directions")]
    RequiresUserLocation,

    #[error("Not enough valid points in route data ({0} usable)")]
    InsufficientRoutePoints(usize),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Why a credential check or session lookup was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("no user found with this email")]
    UserNotFound,

    #[error("incorrect password")]
    InvalidPassword,

    #[error("no session supplied")]
    MissingSession,

    #[error("session is invalid or expired")]
    InvalidSession,
}

/// Provider URLs carry the API key, so the URL is stripped from the message
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Error::Transport(format!("request timed out: {}", err))
        } else {
            Error::Transport(err.to_string())
        }
    }
}

/// Result type alias for workspot operations
pub type Result<T> = std::result::Result<T, Error>;
