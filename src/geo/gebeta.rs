//! Gebeta Maps backend
//!
//! Both endpoints take the API key as a query parameter, so request URLs
//! are never logged in full.

use crate::config::ProviderConfig;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::directions::parse_direction_response;
use crate::geo::geocoding::parse_geocode_response;
use crate::geo::{Directions, GeocodeOutcome, Geocoder, Route};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("workspot/", env!("CARGO_PKG_VERSION"));

/// Gebeta Maps geocoding and routing client
#[derive(Debug, Clone)]
pub struct GebetaClient {
    client: reqwest::Client,
    geocoding_url: String,
    direction_url: String,
    api_key: String,
}

impl GebetaClient {
    /// Build a client from provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            direction_url: config.direction_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn fetch(&self, url: &str, what: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "{} provider returned status: {}",
                what, status
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Geocoder for GebetaClient {
    async fn geocode(&self, query: &str) -> Result<GeocodeOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(GeocodeOutcome::Skipped);
        }

        debug!("Geocoding \"{}\"", query);
        let url = format!(
            "{}?name={}&apiKey={}",
            self.geocoding_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        );

        let body = self.fetch(&url, "Geocoding").await?;
        let outcome = parse_geocode_response(&body)?;
        debug!("Geocoding \"{}\" -> {}", query, outcome.status());
        Ok(outcome)
    }
}

impl Directions for GebetaClient {
    async fn route(&self, origin: Coordinates, destination: Coordinates) -> Result<Route> {
        debug!("Requesting route {} -> {}", origin, destination);
        let url = format!(
            "{}?origin={}&destination={}&apiKey={}",
            self.direction_url,
            urlencoding::encode(&origin.to_query()),
            urlencoding::encode(&destination.to_query()),
            urlencoding::encode(&self.api_key)
        );

        let body = self.fetch(&url, "Direction").await?;
        let route = parse_direction_response(&body)?;
        debug!(
            "Route has {} points, {:.2} km",
            route.points.len(),
            route.distance_km
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LngLat;
    use approx::assert_relative_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout_secs: u64) -> GebetaClient {
        GebetaClient::new(&ProviderConfig {
            geocoding_url: format!("{}/geocoding", server.uri()),
            direction_url: format!("{}/direction/", server.uri()),
            api_key: "test-key".to_string(),
            timeout_secs,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_geocode_normalizes_both_spellings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocoding"))
            .and(query_param("name", "Bole"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "msg": "ok",
                "data": [
                    {"name": "Bole Road", "lat": 8.99, "lng": 38.79, "City": "Addis Ababa", "country": "Ethiopia"},
                    {"name": "Bole Airport", "latitude": 8.98, "longitude": 38.8, "city": "Addis Ababa", "Country": "Ethiopia"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server, 5).geocode("Bole").await.unwrap();
        let candidates = outcome.candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].latitude, Some(8.98));
        assert!(candidates.iter().all(|c| c.city.as_deref() == Some("Addis Ababa")));
        assert!(candidates.iter().all(|c| c.country.as_deref() == Some("Ethiopia")));
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = client_for(&server, 5).geocode("   ").await.unwrap();
        assert_eq!(outcome, GeocodeOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_geocode_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocoding"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server, 5).geocode("Piassa").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_route_request_and_conversion() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/"))
            .and(query_param("origin", "9.03,38.74"))
            .and(query_param("destination", "9,38.76"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "msg": "ok",
                "direction": [[9.03, 38.74], [9.01, 38.75], [9.0, 38.76]],
                "totalDistance": 2200,
                "timetaken": 300
            })))
            .expect(1)
            .mount(&server)
            .await;

        let route = client_for(&server, 5)
            .route(Coordinates::new(9.03, 38.74), Coordinates::new(9.0, 38.76))
            .await
            .unwrap();

        assert_eq!(route.points.first(), Some(&LngLat(38.74, 9.03)));
        assert_eq!(route.points.last(), Some(&LngLat(38.76, 9.0)));
        assert_relative_eq!(route.distance_km, 2.2);
        assert_relative_eq!(route.duration_min, 5.0);
    }

    #[tokio::test]
    async fn test_route_skips_bad_points() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "msg": "ok",
                "direction": [[1, 2], ["x", 4], [5, 6]]
            })))
            .mount(&server)
            .await;

        let route = client_for(&server, 5)
            .route(Coordinates::new(1.0, 2.0), Coordinates::new(5.0, 6.0))
            .await
            .unwrap();
        assert_eq!(route.points, vec![LngLat(2.0, 1.0), LngLat(6.0, 5.0)]);
    }

    #[tokio::test]
    async fn test_route_without_path_is_no_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "no route"})))
            .mount(&server)
            .await;

        let err = client_for(&server, 5)
            .route(Coordinates::new(1.0, 2.0), Coordinates::new(5.0, 6.0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoRoute(_)));
    }

    #[tokio::test]
    async fn test_connection_error_hides_api_key() {
        let client = GebetaClient::new(&ProviderConfig {
            geocoding_url: "http://127.0.0.1:9/geocoding".to_string(),
            direction_url: "http://127.0.0.1:9/direction/".to_string(),
            api_key: "SUPER-SECRET-KEY".to_string(),
            timeout_secs: 2,
        })
        .unwrap();

        let err = client.geocode("Bole").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.to_string().contains("SUPER-SECRET-KEY"));

        let err = client
            .route(Coordinates::new(9.03, 38.74), Coordinates::new(9.0, 38.76))
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("SUPER-SECRET-KEY"));
        assert!(!err.to_string().contains("apiKey"));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"msg": "ok", "data": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, 1).geocode("Bole").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
