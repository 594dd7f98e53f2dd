//! Error surface of the HTTP boundary.
//!
//! Every failure becomes a JSON body of the shape `{"error": message}` with
//! the status implied by the error kind. Provider failures fold the provider
//! name and upstream status into the message.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use serde_json::json;

use crate::inference::ProviderError;
use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed bearer token.
    Unauthenticated,
    /// Missing required body fields, malformed JSON, or an unknown model.
    BadRequest(String),
    /// Record id absent from the caller's own collection.
    NotFound(String),
    /// Adapter failure; status depends on the variant.
    Provider(ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "missing or invalid bearer token".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Provider(err) => {
                let status = match err {
                    ProviderError::Unsupported(_) => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        if status.is_server_error() {
            warn!("request failed: {}", message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Provider(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

/// JSON body extractor whose rejection is a 400 `{"error": ...}` body
/// instead of axum's plain-text default.
pub struct ApiJson<T>(pub T);

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(bad_body(rejection)),
        }
    }
}
