//! Place records
//!
//! A place is a venue registered by an administrator. Writes go through
//! [`PlaceDraft`], which is validated into [`PlaceFields`] before any store
//! access happens.

pub mod repository;

pub use repository::PlaceRepository;

use crate::constants::places::NOT_KNOWN;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned place identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(Uuid);

impl PlaceId {
    /// Allocate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlaceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| Error::InvalidIdentifier(format!("Invalid id: {}", s)))
    }
}

/// A persisted place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
    pub open_hours: String,
    pub open_days: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A coordinate as submitted by a client: a JSON number or numeric text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    /// Parse into a finite number, or None if it is not one
    pub fn to_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Client-submitted place body, used for both create and full update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,
    pub images: Option<Vec<String>>,
    pub open_hours: Option<String>,
    pub open_days: Option<String>,
}

/// Validated mutable fields of a place
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceFields {
    pub name: String,
    pub phone: String,
    pub coordinates: Coordinates,
    pub images: Vec<String>,
    pub open_hours: String,
    pub open_days: String,
}

impl PlaceDraft {
    /// Validate for creation; missing images fall back to `placeholder_image`
    pub fn validate_for_create(&self, placeholder_image: &str) -> Result<PlaceFields> {
        self.validate(Some(placeholder_image))
    }

    /// Validate for a full replace; images are required
    pub fn validate_for_update(&self) -> Result<PlaceFields> {
        self.validate(None)
    }

    fn validate(&self, placeholder_image: Option<&str>) -> Result<PlaceFields> {
        let name = non_blank(&self.name);
        let phone = non_blank(&self.phone);
        let images = self
            .images
            .as_ref()
            .map(|images| {
                images
                    .iter()
                    .map(|url| url.trim())
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|images| !images.is_empty())
            .or_else(|| placeholder_image.map(|placeholder| vec![placeholder.to_string()]));

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if phone.is_none() {
            missing.push("phone");
        }
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }
        if images.is_none() {
            missing.push("images");
        }
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let latitude = parse_coordinate("latitude", self.latitude.as_ref())?;
        let longitude = parse_coordinate("longitude", self.longitude.as_ref())?;
        let coordinates = Coordinates::new(latitude, longitude);
        coordinates.validate()?;

        Ok(PlaceFields {
            name: name.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            coordinates,
            images: images.unwrap_or_default(),
            open_hours: non_blank(&self.open_hours).unwrap_or_else(|| NOT_KNOWN.to_string()),
            open_days: non_blank(&self.open_days).unwrap_or_else(|| NOT_KNOWN.to_string()),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_coordinate(field: &str, input: Option<&CoordinateInput>) -> Result<f64> {
    input.and_then(CoordinateInput::to_finite).ok_or_else(|| {
        Error::Validation(format!("{} must be a finite number", field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PlaceDraft {
        PlaceDraft {
            name: Some("Tomoca Coffee".to_string()),
            phone: Some("+251 11 111 1111".to_string()),
            latitude: Some(9.03.into()),
            longitude: Some(38.74.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_place_id_parse() {
        let id = PlaceId::generate();
        let parsed: PlaceId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        let err = "not-an-id".parse::<PlaceId>().unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
    }

    #[test]
    fn test_create_applies_defaults() {
        let fields = draft().validate_for_create("/assets/placeholder.jpg").unwrap();

        assert_eq!(fields.images, vec!["/assets/placeholder.jpg".to_string()]);
        assert_eq!(fields.open_hours, "Not Known");
        assert_eq!(fields.open_days, "Not Known");
        assert_eq!(fields.coordinates, Coordinates::new(9.03, 38.74));
    }

    #[test]
    fn test_empty_image_list_uses_placeholder() {
        let mut d = draft();
        d.images = Some(vec!["  ".to_string()]);
        let fields = d.validate_for_create("/p.jpg").unwrap();
        assert_eq!(fields.images, vec!["/p.jpg".to_string()]);
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let d = PlaceDraft {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let err = d.validate_for_create("/p.jpg").unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Validation(_)));
        assert!(message.contains("name"));
        assert!(message.contains("phone"));
        assert!(message.contains("latitude"));
        assert!(message.contains("longitude"));
        assert!(!message.contains("images"));
    }

    #[test]
    fn test_update_requires_images() {
        let err = draft().validate_for_update().unwrap_err();
        assert!(err.to_string().contains("images"));

        let mut d = draft();
        d.images = Some(vec!["https://utfs.io/f/a.jpg".to_string()]);
        assert!(d.validate_for_update().is_ok());
    }

    #[test]
    fn test_non_numeric_latitude_is_rejected() {
        let mut d = draft();
        d.latitude = Some(CoordinateInput::Text("not-a-number".to_string()));
        let err = d.validate_for_create("/p.jpg").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("latitude"));

        d.latitude = Some(CoordinateInput::Text("NaN".to_string()));
        assert!(d.validate_for_create("/p.jpg").is_err());
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let mut d = draft();
        d.latitude = Some(CoordinateInput::Text(" 9.01 ".to_string()));
        let fields = d.validate_for_create("/p.jpg").unwrap();
        assert_eq!(fields.coordinates.lat, 9.01);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut d = draft();
        d.longitude = Some(200.0.into());
        assert!(d.validate_for_create("/p.jpg").is_err());
    }

    #[test]
    fn test_draft_deserializes_camel_case() {
        let d: PlaceDraft = serde_json::from_value(serde_json::json!({
            "name": "Cafe",
            "phone": "0911",
            "latitude": "9.0",
            "longitude": 38.7,
            "openHours": "8-22",
            "openDays": "Mon-Sat"
        }))
        .unwrap();

        assert_eq!(d.latitude, Some(CoordinateInput::Text("9.0".to_string())));
        assert_eq!(d.longitude, Some(CoordinateInput::Number(38.7)));
        let fields = d.validate_for_create("/p.jpg").unwrap();
        assert_eq!(fields.open_hours, "8-22");
        assert_eq!(fields.open_days, "Mon-Sat");
    }
}
