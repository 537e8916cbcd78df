use thiserror::Error;

use crate::rfc::tz::ConversionError;

/// Recurrence and timezone errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRuleFormat(String),

    #[error("Recurrence expansion exceeded {0} occurrences")]
    RuleLimitExceeded(u16),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    CoreError(#[from] splash_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
