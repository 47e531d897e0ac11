//! Coordinate types
//!
//! Two orders are in play:
//! - [`Coordinates`] is the (latitude, longitude) pair users and providers speak.
//! - [`LngLat`] is the canonical internal order used for route geometry.
//!
//! Conversions between them are explicit so a swap never happens implicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are finite and within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(Error::Validation(
                "Coordinates must be finite numbers".to_string(),
            ));
        }
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(Error::Validation(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(Error::Validation(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Format as the provider's "latitude,longitude" query value
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }

    /// Convert to the canonical (longitude, latitude) order
    pub fn to_lng_lat(&self) -> LngLat {
        LngLat(self.lng, self.lat)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Parses "lat,lng" (as typed on the command line or in a query string)
impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            Error::Validation(format!("Expected \"lat,lng\", got \"{}\"", s))
        })?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::Validation(format!("Invalid latitude: {}", lat.trim())))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| Error::Validation(format!("Invalid longitude: {}", lng.trim())))?;

        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

/// A point in canonical (longitude, latitude) order
///
/// Serializes as a two-element array `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat(pub f64, pub f64);

impl LngLat {
    pub fn lng(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }

    /// Convert back to a (latitude, longitude) pair
    pub fn to_coordinates(&self) -> Coordinates {
        Coordinates::new(self.1, self.0)
    }
}
