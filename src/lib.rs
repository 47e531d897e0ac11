//! workspot: a directory of laptop-friendly places
//!
//! A library and CLI tool for recording venues suitable for remote work and
//! guiding people to them.
//!
//! ## Features
//!
//! - Place records with validated coordinates, images and opening times
//! - Administrator sign-in with bcrypt passwords and signed session tokens
//! - Geocoding and turn-by-turn route lookup through Gebeta Maps
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use workspot::places::{CoordinateInput, PlaceDraft};
//! use workspot::Coordinates;
//!
//! let here: Coordinates = "9.03,38.74".parse().unwrap();
//! assert_eq!(here.to_query(), "9.03,38.74");
//!
//! let draft = PlaceDraft {
//!     name: Some("Tomoca".to_string()),
//!     phone: Some("0911000000".to_string()),
//!     latitude: Some(CoordinateInput::Text("9.03".to_string())),
//!     longitude: Some(38.74.into()),
//!     ..Default::default()
//! };
//! let fields = draft.validate_for_create("/assets/placeholder.jpg").unwrap();
//! assert_eq!(fields.images, vec!["/assets/placeholder.jpg".to_string()]);
//! assert_eq!(fields.open_hours, "Not Known");
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod db;
pub mod error;
pub mod format;
pub mod geo;
pub mod places;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, LngLat};
pub use error::{Error, Result};
pub use geo::{GeocodeOutcome, GeocodingCandidate, Route};
pub use places::{Place, PlaceDraft, PlaceId};
