pub use crate::schema::sea_orm_active_enums::*;
pub use crate::error::DomainError;
