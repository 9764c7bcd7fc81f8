use sea_orm::DbErr;
use thiserror::Error;

/// Failures raised by domain procedures.
///
/// `NotFound` carries the kind of record that was missing so the HTTP layer
/// can render "Team not found" style messages without extra plumbing.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::Invalid(message.into())
    }
}
