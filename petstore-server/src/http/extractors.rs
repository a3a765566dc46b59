//! Custom Axum extractors
//!
//! Both extractors reject with [`ApiError::Validation`], so every malformed
//! input becomes a 400 with the usual JSON error body.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract an integer id from the path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::InvalidFormat {
                field: "id",
                reason: e.body_text(),
            })?;

        let id = raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: format!("expected an integer, got '{}'", raw),
        })?;

        Ok(Self(id))
    }
}

/// JSON request body; syntax, type and content-type failures are all 400
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ValidationError::MalformedBody {
                reason: e.body_text(),
            })?;

        Ok(Self(value))
    }
}
