//! Request extractors
//!
//! Wrap axum's JSON and query extractors so rejections come back in the
//! same `{success, error, code}` shape as every other API error.

use crate::auth::Session;
use crate::error::Error;
use crate::server::routes::ApiError;
use crate::server::state::AppState;
use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// JSON body extractor with API-shaped rejections
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(Error::Validation(json_rejection_message(&rejection)).into()),
        }
    }
}

fn json_rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with Content-Type: application/json".to_string()
        }
        _ => "Failed to parse JSON body".to_string(),
    }
}

/// Query string extractor with API-shaped rejections
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(QueryRejection::FailedToDeserializeQueryString(err)) => Err(Error::Validation(
                format!("Invalid query string: {}", err.body_text()),
            )
            .into()),
            Err(_) => Err(Error::Validation("Invalid query string".to_string()).into()),
        }
    }
}

/// Handlers taking a `Session` require a valid bearer token
///
/// Runs before any body extractor, so an anonymous caller gets 401 even when
/// the body is malformed.
#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.authorize(&parts.headers)?)
    }
}
