use thiserror::Error;

use crate::booking::Rejection;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    DatabaseError(#[from] splash_db::error::DbError),

    #[error(transparent)]
    RfcError(#[from] splash_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] splash_core::error::CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

impl From<splash_rfc::rfc::tz::ConversionError> for ServiceError {
    fn from(value: splash_rfc::rfc::tz::ConversionError) -> Self {
        Self::RfcError(value.into())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
