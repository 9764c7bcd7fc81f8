use axum::{
    async_trait,
    body::HttpBody,
    extract::{FromRequest, FromRequestParts, Path},
    http::{request::Parts, Request, StatusCode},
    BoxError, Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::response::APIError;

/// A positive surrogate key taken from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i64")]
pub struct Id(pub i32);

impl TryFrom<i64> for Id {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match i32::try_from(value) {
            Ok(id) if id >= 1 => Ok(Id(id)),
            _ => Err(format!("Invalid id {}", value)),
        }
    }
}

/// Path parameters, rejected with 400 before any handler code runs.
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| APIError::from((StatusCode::BAD_REQUEST, rejection.body_text())))?;
        Ok(ValidPath(value))
    }
}

/// A JSON body that has passed its `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = APIError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| APIError::from((StatusCode::BAD_REQUEST, rejection.body_text())))?;
        value.validate()
            .map_err(|errors| APIError::from((StatusCode::BAD_REQUEST, errors.to_string())))?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod test {
    use super::Id;

    #[test]
    fn test_id_must_be_positive() {
        assert_eq!(Id::try_from(7), Ok(Id(7)));
        assert!(Id::try_from(0).is_err());
        assert!(Id::try_from(-3).is_err());
        assert!(Id::try_from(i64::from(i32::MAX) + 1).is_err());
    }
}
