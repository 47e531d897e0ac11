//! Geocoding and routing
//!
//! Free-text queries resolve to [`GeocodingCandidate`]s and coordinate pairs
//! resolve to [`Route`]s through an external provider. The provider is
//! reached through the [`Geocoder`] and [`Directions`] traits so callers can
//! be exercised without the network.

pub mod directions;
pub mod gebeta;
pub mod geocoding;
pub mod navigator;

pub use directions::resolve_route;
pub use gebeta::GebetaClient;
pub use navigator::{Navigation, Navigator};

use crate::coord::{Coordinates, LngLat};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A normalized geocoding result
///
/// At least one of `latitude`/`longitude` is a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingCandidate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl GeocodingCandidate {
    /// Full coordinates, when both halves are known
    ///
    /// A candidate missing either half cannot pre-fill a place.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    /// "City, Country" when both are known
    pub fn locality(&self) -> Option<String> {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
            _ => None,
        }
    }
}

/// Result of a geocoding lookup
///
/// Empty outcomes are not errors; they carry distinct user messaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum GeocodeOutcome {
    /// Blank query; nothing was sent
    Skipped,
    /// Usable candidates in provider order
    Found(Vec<GeocodingCandidate>),
    /// Provider reported nothing for the query
    NoResults,
    /// Provider returned entries but none carried coordinates
    NoValidResults,
}

impl GeocodeOutcome {
    pub fn candidates(&self) -> &[GeocodingCandidate] {
        match self {
            Self::Found(candidates) => candidates,
            _ => &[],
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Found(_) => "found",
            Self::NoResults => "no_results",
            Self::NoValidResults => "no_valid_results",
        }
    }

    /// Message shown to the user for an empty outcome
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Skipped | Self::Found(_) => None,
            Self::NoResults => Some("No locations found"),
            Self::NoValidResults => Some("No valid location data found"),
        }
    }
}

/// A renderable route
///
/// Always holds at least two points, in canonical (longitude, latitude) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub points: Vec<LngLat>,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Trait for geocoding backends
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text query into candidates
    fn geocode(&self, query: &str) -> impl std::future::Future<Output = Result<GeocodeOutcome>> + Send;
}

/// Trait for routing backends
pub trait Directions: Send + Sync {
    /// Fetch a route between two (latitude, longitude) positions
    fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> impl std::future::Future<Output = Result<Route>> + Send;
}
