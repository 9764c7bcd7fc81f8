use axum::{response::{IntoResponse, Response}, Json};
use hyper::StatusCode;
use ml_master_data_entities::DomainError;
use serde::{Serialize, Deserialize};
use tracing::{error, warn};


#[derive(Debug, Clone)]
pub struct APIError {
    pub message: String,
    pub code: StatusCode
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct APIErrorResponse {
    pub error: String
}

/// Body of successful responses that carry no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(MessageResponse { message: message.into() })
    }
}

impl APIError {
    pub fn new(message: String) -> Self {
        APIError {
            message,
            code: StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<anyhow::Error> for APIError {
    fn from(err: anyhow::Error) -> Self {
        handle_error_dyn(err.into())
    }
}

impl From<DomainError> for APIError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(_) => APIError { message: err.to_string(), code: StatusCode::NOT_FOUND },
            DomainError::Invalid(message) => APIError { message, code: StatusCode::BAD_REQUEST },
            DomainError::Db(err) => handle_error(err),
        }
    }
}

impl IntoResponse for APIError
{
    fn into_response(self) -> Response {
        (self.code, Json(APIErrorResponse { error: self.message })).into_response()
    }
}


impl From<(StatusCode, &str)> for APIError {
    fn from((code, message): (StatusCode, &str)) -> Self {
        warn!("Rejected request: {}", message);
        APIError { message: message.to_string(), code }
    }
}

impl From<(StatusCode, String)> for APIError {
    fn from((code, message): (StatusCode, String)) -> Self {
        warn!("Rejected request: {}", message);
        APIError { message, code }
    }
}

/// Logs a store failure and answers with a generic 500.
pub fn handle_error<E>(err: E) -> APIError
where
    E: std::error::Error
{
    error!("Error while handling request {}", err);
    APIError::new("Internal server error".to_string())
}

pub fn handle_error_dyn(err: Box<dyn std::error::Error + Send + Sync>) -> APIError
{
    error!("Error while handling request {}", err);
    APIError::new("Internal server error".to_string())
}

#[cfg(test)]
mod test {
    use ml_master_data_entities::DomainError;
    use sea_orm::DbErr;

    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let not_found: APIError = DomainError::NotFound("Team").into();
        assert_eq!(not_found.code, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Team not found");

        let invalid: APIError = DomainError::invalid("Duplicate game numbers: 2").into();
        assert_eq!(invalid.code, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, "Duplicate game numbers: 2");

        let db: APIError = DomainError::Db(DbErr::Custom("table missing".into())).into();
        assert_eq!(db.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!db.message.contains("table missing"));
    }
}
