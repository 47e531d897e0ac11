//! Geocoding response interpretation
//!
//! The provider spells the same concept two ways (`lat` / `latitude`,
//! `city` / `City`, ...). Each spelling is captured as its own raw shape and
//! [`RawCandidate::normalize`] coalesces them into one canonical
//! [`GeocodingCandidate`], preferring the primary (lowercase, short) form.

use crate::constants::api::SUCCESS_MARKER;
use crate::error::{Error, Result};
use crate::geo::{GeocodeOutcome, GeocodingCandidate};
use serde::Deserialize;
use serde_json::Value;

/// Top-level geocoding payload: `{msg, data}`
#[derive(Debug, Deserialize)]
struct GeocodeEnvelope {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Primary spelling: `lat`, `lng`, `city`, `country`
#[derive(Debug, Default, Deserialize)]
struct PrimaryShape {
    lat: Option<Value>,
    lng: Option<Value>,
    city: Option<Value>,
    country: Option<Value>,
}

/// Alternate spelling: `latitude`, `longitude`, `City`, `Country`
#[derive(Debug, Default, Deserialize)]
struct AlternateShape {
    latitude: Option<Value>,
    longitude: Option<Value>,
    #[serde(rename = "City")]
    city: Option<Value>,
    #[serde(rename = "Country")]
    country: Option<Value>,
}

/// One provider entry, both spellings captured side by side
#[derive(Debug, Deserialize)]
struct RawCandidate {
    #[serde(default)]
    name: Option<Value>,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(flatten)]
    primary: PrimaryShape,
    #[serde(flatten)]
    alternate: AlternateShape,
}

impl RawCandidate {
    fn normalize(self) -> GeocodingCandidate {
        let primary = self.primary;
        let alternate = self.alternate;

        GeocodingCandidate {
            name: text(self.name.as_ref()).unwrap_or_default(),
            latitude: number(primary.lat.as_ref()).or_else(|| number(alternate.latitude.as_ref())),
            longitude: number(primary.lng.as_ref())
                .or_else(|| number(alternate.longitude.as_ref())),
            city: text(primary.city.as_ref()).or_else(|| text(alternate.city.as_ref())),
            country: text(primary.country.as_ref()).or_else(|| text(alternate.country.as_ref())),
            kind: text(self.kind.as_ref()),
        }
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// True when the provider's `msg` marks success
pub(crate) fn is_success(msg: Option<&str>) -> bool {
    msg.is_some_and(|m| m.trim().eq_ignore_ascii_case(SUCCESS_MARKER))
}

/// Interpret a geocoding response body
///
/// Entries without a numeric latitude or longitude are dropped silently.
pub fn parse_geocode_response(body: &[u8]) -> Result<GeocodeOutcome> {
    let envelope: GeocodeEnvelope = serde_json::from_slice(body)
        .map_err(|e| Error::Transport(format!("Malformed geocoding response: {}", e)))?;

    if !is_success(envelope.msg.as_deref()) {
        return Ok(GeocodeOutcome::NoResults);
    }

    let entries = match envelope.data {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Ok(GeocodeOutcome::NoResults),
    };

    let candidates: Vec<GeocodingCandidate> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawCandidate>(entry).ok())
        .map(RawCandidate::normalize)
        .filter(|c| c.latitude.is_some() || c.longitude.is_some())
        .collect();

    if candidates.is_empty() {
        Ok(GeocodeOutcome::NoValidResults)
    } else {
        Ok(GeocodeOutcome::Found(candidates))
    }
}
