//! Output formatters
//!
//! Renders geocoding and routing results for the command line.

pub mod gpx;
pub mod json;
pub mod text;

use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::{GeocodeOutcome, Route};
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Something a command produced and wants printed
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Geocode {
        query: String,
        outcome: GeocodeOutcome,
    },
    Route {
        origin: Coordinates,
        destination: Coordinates,
        route: Route,
    },
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a report
    fn format(&self, report: &Report) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &gpx::GpxFormatter,
    ]
    .iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Report;
    use crate::coord::{Coordinates, LngLat};
    use crate::geo::{GeocodeOutcome, GeocodingCandidate, Route};

    pub fn route_report() -> Report {
        Report::Route {
            origin: Coordinates::new(9.03, 38.74),
            destination: Coordinates::new(9.0, 38.76),
            route: Route {
                points: vec![LngLat(38.74, 9.03), LngLat(38.75, 9.01), LngLat(38.76, 9.0)],
                distance_km: 2.2,
                duration_min: 5.0,
            },
        }
    }

    pub fn geocode_report() -> Report {
        Report::Geocode {
            query: "Bole".to_string(),
            outcome: GeocodeOutcome::Found(vec![
                GeocodingCandidate {
                    name: "Bole Road & Sons".to_string(),
                    latitude: Some(8.99),
                    longitude: Some(38.79),
                    city: Some("Addis Ababa".to_string()),
                    country: Some("Ethiopia".to_string()),
                    kind: Some("street".to_string()),
                },
                GeocodingCandidate {
                    name: "Bole Sub-city".to_string(),
                    latitude: Some(8.98),
                    longitude: None,
                    city: None,
                    country: None,
                    kind: None,
                },
            ]),
        }
    }
}
