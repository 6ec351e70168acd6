//! JSON body extractors with application-style rejections.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Like [`axum::Json`], but a malformed body becomes [`AppError::BadRequest`].
///
/// Field rules are not checked here: forms are validated by the services so
/// a rejected form can be echoed back with its errors.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(JsonBody(value))
    }
}

/// A body that may be left out.
///
/// An empty body yields `None`; anything else must be valid JSON for `T`.
pub struct OptionalJsonBody<T>(pub Option<T>);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJsonBody(None));
        }

        let Json(value) =
            Json::<T>::from_bytes(&bytes).map_err(|e| AppError::bad_request(e.body_text()))?;
        Ok(OptionalJsonBody(Some(value)))
    }
}
