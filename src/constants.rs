//! Centralized constants for the workspot crate
//!
//! Values shared by several modules live here so the provider contract and
//! place defaults are defined once.

/// External API endpoints
pub mod api {
    /// Gebeta Maps geocoding endpoint
    pub const GEOCODING_URL: &str = "https://mapapi.gebeta.app/api/v1/route/geocoding";

    /// Gebeta Maps direction endpoint
    pub const DIRECTION_URL: &str = "https://mapapi.gebeta.app/api/route/direction/";

    /// Success marker returned in the provider's `msg` field (compared case-insensitively)
    pub const SUCCESS_MARKER: &str = "ok";
}

/// Place record defaults
pub mod places {
    /// Image used when a place is created without any
    pub const PLACEHOLDER_IMAGE: &str = "/assets/placeholder.jpg";

    /// Value stored for opening hours/days that were left blank
    pub const NOT_KNOWN: &str = "Not Known";
}

/// Unit conversions applied to provider route totals
pub mod units {
    pub const METERS_PER_KILOMETER: f64 = 1000.0;
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}
