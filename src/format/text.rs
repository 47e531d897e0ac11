//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{OutputFormatter, Report};
use crate::geo::GeocodingCandidate;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

fn coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| format!("{:.6}", v))
}

fn candidate_line(index: usize, candidate: &GeocodingCandidate) -> String {
    let mut line = format!(
        "  {}. {} ({}, {})",
        index + 1,
        candidate.name,
        coordinate(candidate.latitude),
        coordinate(candidate.longitude)
    );
    if let Some(locality) = candidate.locality() {
        line.push_str(&format!(" - {}", locality));
    }
    if let Some(kind) = &candidate.kind {
        line.push_str(&format!(" [{}]", kind));
    }
    line
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        match report {
            Report::Geocode { query, outcome } => {
                output.push_str(&format!("Search: \"{}\"\n", query));
                if let Some(message) = outcome.message() {
                    output.push_str(&format!("{}\n", message));
                } else if outcome.candidates().is_empty() {
                    output.push_str("Nothing to search for\n");
                } else {
                    output.push_str("Results:\n");
                    for (i, candidate) in outcome.candidates().iter().enumerate() {
                        output.push_str(&candidate_line(i, candidate));
                        output.push('\n');
                    }
                }
            }
            Report::Route {
                origin,
                destination,
                route,
            } => {
                output.push_str(&format!(
                    "Route: ({:.6}, {:.6}) -> ({:.6}, {:.6})\n",
                    origin.lat, origin.lng, destination.lat, destination.lng
                ));
                output.push_str(&format!("Distance: {:.2} km\n", route.distance_km));
                output.push_str(&format!("Duration: {:.0} min\n", route.duration_min));
                output.push_str(&format!("Points: {}\n", route.points.len()));
            }
        }

        Ok(output)
    }
}
