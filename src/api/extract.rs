//! Request extractors that report failures as JSON 400s

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::dto::Validate;
use crate::error::{Error, Result};

/// JSON body that has been deserialized and validated
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Parse a numeric path id
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| Error::BadRequest(format!("Invalid id: {}", raw)))
}
