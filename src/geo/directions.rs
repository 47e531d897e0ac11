//! Direction response interpretation

use crate::constants::units::{METERS_PER_KILOMETER, SECONDS_PER_MINUTE};
use crate::coord::{Coordinates, LngLat};
use crate::error::{Error, Result};
use crate::geo::geocoding::is_success;
use crate::geo::{Directions, Route};
use serde::Deserialize;
use serde_json::Value;

/// Top-level direction payload
#[derive(Debug, Deserialize)]
struct DirectionEnvelope {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    direction: Option<Value>,
    #[serde(rename = "totalDistance", default)]
    total_distance: Option<Value>,
    #[serde(default)]
    timetaken: Option<Value>,
}

/// Provider path entries are `[lat, lng]`; anything else is skipped
fn path_point(value: &Value) -> Option<LngLat> {
    match value.as_array()?.as_slice() {
        [lat, lng] => {
            let lat = lat.as_f64().filter(|n| n.is_finite())?;
            let lng = lng.as_f64().filter(|n| n.is_finite())?;
            Some(LngLat(lng, lat))
        }
        _ => None,
    }
}

fn quantity(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Interpret a direction response body
///
/// Distance and duration default to 0 when the provider omits them.
pub fn parse_direction_response(body: &[u8]) -> Result<Route> {
    let envelope: DirectionEnvelope = serde_json::from_slice(body)
        .map_err(|e| Error::Transport(format!("Malformed direction response: {}", e)))?;

    if !is_success(envelope.msg.as_deref()) {
        return Err(Error::NoRoute(format!(
            "provider answered \"{}\"",
            envelope.msg.unwrap_or_default()
        )));
    }

    let path = match envelope.direction {
        Some(Value::Array(path)) if !path.is_empty() => path,
        _ => return Err(Error::NoRoute("response carried no path".to_string())),
    };

    let points: Vec<LngLat> = path.iter().filter_map(path_point).collect();
    if points.len() < 2 {
        return Err(Error::InsufficientRoutePoints(points.len()));
    }

    Ok(Route {
        points,
        distance_km: quantity(envelope.total_distance.as_ref()) / METERS_PER_KILOMETER,
        duration_min: quantity(envelope.timetaken.as_ref()) / SECONDS_PER_MINUTE,
    })
}

/// Resolve a route from the user's position to a destination
///
/// Without a known origin nothing is requested from the provider.
pub async fn resolve_route<D: Directions>(
    directions: &D,
    origin: Option<Coordinates>,
    destination: Coordinates,
) -> Result<Route> {
    let origin = origin.ok_or(Error::RequiresUserLocation)?;
    origin.validate()?;
    destination.validate()?;
    directions.route(origin, destination).await
}
