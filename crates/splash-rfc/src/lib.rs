//! Calendar arithmetic for the booking engine: RFC 5545 recurrence rules and
//! timezone-aware instants.

pub mod error;
pub mod rfc;
