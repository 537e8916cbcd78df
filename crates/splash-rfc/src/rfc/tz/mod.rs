//! Timezone resolution and the instant builder.
//!
//! Every conversion between a location's wall clock and UTC goes through
//! [`InstantBuilder`]; callers never concatenate date and time strings.

mod instant;
mod resolver;

pub use instant::{InstantBuilder, build_instant, instant_to_local};
pub use resolver::resolve_timezone;

/// Error during timezone conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),

    /// Date arithmetic left chrono's representable range.
    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),
}
