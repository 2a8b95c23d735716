//! JSON body extractors
//!
//! `ValidatedJson` runs the `validator` rules of the request type before the
//! handler sees it; `JsonBody` only deserializes.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

fn body_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.body_text()),
        _ => ApiError::invalid_body("Invalid JSON body"),
    }
}

/// JSON body that is validated after deserialization
///
/// Rule violations reject with 422 and per-field details.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// JSON body whose rules live on the record it becomes
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_error)?;

        Ok(JsonBody(value))
    }
}
