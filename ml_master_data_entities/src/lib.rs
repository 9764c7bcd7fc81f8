pub mod schema;
pub mod domain;
pub mod error;
pub mod prelude;
pub mod queries;

pub use error::DomainError;
