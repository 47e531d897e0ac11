//! GPX output formatter
//!
//! Routes become a single track; geocoding candidates with both coordinates
//! become waypoints.

use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// GPX formatter - outputs a GPX track or waypoint file
pub struct GpxFormatter;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX track or waypoint file"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="workspot">"#);
        gpx.push('\n');

        match report {
            Report::Geocode { query, outcome } => {
                gpx.push_str("  <metadata>\n");
                gpx.push_str(&format!("    <name>Search: {}</name>\n", escape(query)));
                gpx.push_str("  </metadata>\n");

                for candidate in outcome.candidates() {
                    let Some(coords) = candidate.coordinates() else {
                        continue;
                    };
                    gpx.push_str(&format!(
                        r#"  <wpt lat="{}" lon="{}">"#,
                        coords.lat, coords.lng
                    ));
                    gpx.push('\n');
                    gpx.push_str(&format!("    <name>{}</name>\n", escape(&candidate.name)));
                    if let Some(locality) = candidate.locality() {
                        gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&locality)));
                    }
                    if let Some(kind) = &candidate.kind {
                        gpx.push_str(&format!("    <type>{}</type>\n", escape(kind)));
                    }
                    gpx.push_str("  </wpt>\n");
                }
            }
            Report::Route {
                origin,
                destination,
                route,
            } => {
                gpx.push_str("  <trk>\n");
                gpx.push_str(&format!(
                    "    <name>{} to {}</name>\n",
                    origin, destination
                ));
                gpx.push_str(&format!(
                    "    <desc>{:.2} km, {:.0} min</desc>\n",
                    route.distance_km, route.duration_min
                ));
                gpx.push_str("    <trkseg>\n");
                for point in &route.points {
                    gpx.push_str(&format!(
                        "      <trkpt lat=\"{}\" lon=\"{}\"/>\n",
                        point.lat(),
                        point.lng()
                    ));
                }
                gpx.push_str("    </trkseg>\n");
                gpx.push_str("  </trk>\n");
            }
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{geocode_report, route_report};

    #[test]
    fn test_gpx_route_track() {
        let output = GpxFormatter.format(&route_report()).unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert!(output.contains("<trkseg>"));
        assert_eq!(output.matches("<trkpt").count(), 3);
        // Track points are written latitude first
        assert!(output.contains(r#"<trkpt lat="9.03" lon="38.74"/>"#));
        assert!(output.contains("2.20 km, 5 min"));
        assert!(output.contains("</gpx>"));
    }

    #[test]
    fn test_gpx_geocode_waypoints() {
        let output = GpxFormatter.format(&geocode_report()).unwrap();

        // The second candidate has no longitude and is left out
        assert_eq!(output.matches("<wpt").count(), 1);
        assert!(output.contains("<name>Bole Road &amp; Sons</name>"));
        assert!(output.contains("<desc>Addis Ababa, Ethiopia</desc>"));
    }

    #[test]
    fn test_gpx_formatter_info() {
        let formatter = GpxFormatter;
        assert_eq!(formatter.name(), "gpx");
        assert!(!formatter.description().is_empty());
    }
}
