//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::auth::Session;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::{resolve_route, GeocodingCandidate, Geocoder, Route};
use crate::places::{Place, PlaceDraft};
use crate::server::extract::{AppJson, AppQuery};
use crate::server::state::AppState;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/auth/signin", post(signin_handler))
        .route("/api/auth/session", get(session_handler))
        .route("/api/places", get(list_places_handler).post(create_place_handler))
        .route(
            "/api/places/:id",
            get(get_place_handler)
                .put(update_place_handler)
                .delete(delete_place_handler),
        )
        .route("/api/places/:id/directions", get(place_directions_handler))
        .route("/api/geocode", get(geocode_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
    pub code: String,
}

/// API error: a status code plus a JSON body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Error::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "INVALID_ID"),
            Error::RequiresUserLocation => (StatusCode::BAD_REQUEST, "LOCATION_REQUIRED"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Authentication(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Error::Transport(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            Error::NoRoute(_) => (StatusCode::BAD_GATEWAY, "NO_ROUTE"),
            Error::InsufficientRoutePoints(_) => {
                (StatusCode::BAD_GATEWAY, "INSUFFICIENT_ROUTE_POINTS")
            }
            Error::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Error::Io(_) | Error::Json(_) | Error::Server(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Internal details stay in the log
        let message = match &err {
            Error::Transport(_) => {
                warn!("Provider request failed: {}", err);
                "Could not reach the map provider".to_string()
            }
            Error::NoRoute(_) => "Could not find a route to this location".to_string(),
            _ if status.is_server_error() => {
                error!("Request failed: {}", err);
                "Internal server error".to_string()
            }
            _ => err.to_string(),
        };

        ApiError {
            status,
            body: ApiErrorBody {
                success: false,
                error: message,
                code: code.to_string(),
            },
        }
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Database answered a ping
    pub database: bool,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let database = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database ping failed: {}", e);
            false
        }
    };

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    pub success: bool,
    pub token: String,
    pub user: Session,
}

/// POST /api/auth/signin
async fn signin_handler(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SignInRequest>,
) -> ApiResult<SignInResponse> {
    let session = state.users.authenticate(&req.email, &req.password).await?;
    let token = state.sessions.issue(&session)?;

    Ok(Json(SignInResponse {
        success: true,
        token,
        user: session,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: Session,
}

/// GET /api/auth/session
async fn session_handler(user: Session) -> ApiResult<SessionResponse> {
    Ok(Json(SessionResponse {
        success: true,
        user,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub success: bool,
    pub places: Vec<Place>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub success: bool,
    pub place: Place,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub success: bool,
    pub inserted_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /api/places
async fn list_places_handler(State(state): State<Arc<AppState>>) -> ApiResult<PlacesResponse> {
    let places = state.places.list().await?;
    Ok(Json(PlacesResponse {
        success: true,
        places,
    }))
}

/// POST /api/places
async fn create_place_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    AppJson(draft): AppJson<PlaceDraft>,
) -> ApiResult<CreatedResponse> {
    let id = state.places.create(&draft, &session).await?;

    Ok(Json(CreatedResponse {
        success: true,
        inserted_id: id.to_string(),
    }))
}

/// GET /api/places/:id
async fn get_place_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<PlaceResponse> {
    let place = state.places.get(&id).await?;
    Ok(Json(PlaceResponse {
        success: true,
        place,
    }))
}

/// PUT /api/places/:id
async fn update_place_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(id): Path<String>,
    AppJson(draft): AppJson<PlaceDraft>,
) -> ApiResult<SuccessResponse> {
    state.places.update(&id, &draft).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/places/:id
async fn delete_place_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    Path(id): Path<String>,
) -> ApiResult<SuccessResponse> {
    state.places.delete(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// The caller's live position, when the client has one
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationQuery {
    fn origin(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub success: bool,
    pub route: Route,
}

/// Route from the caller to a stored place
///
/// GET /api/places/:id/directions?lat=&lng=
async fn place_directions_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    AppQuery(query): AppQuery<LocationQuery>,
) -> ApiResult<RouteResponse> {
    let origin = query.origin().ok_or(Error::RequiresUserLocation)?;
    let place = state.places.get(&id).await?;
    let route = resolve_route(&state.provider, Some(origin), place.coordinates()).await?;

    Ok(Json(RouteResponse {
        success: true,
        route,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub success: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<GeocodingCandidate>,
}

/// Search the provider for candidate locations (administrators only)
///
/// GET /api/geocode?name=
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    _session: Session,
    AppQuery(query): AppQuery<GeocodeQuery>,
) -> ApiResult<GeocodeResponse> {
    let outcome = state.provider.geocode(&query.name).await?;

    Ok(Json(GeocodeResponse {
        success: true,
        status: outcome.status().to_string(),
        message: outcome.message().map(str::to_string),
        results: outcome.candidates().to_vec(),
    }))
}
