//! RFC 5545 recurrence rules, backed by the `rrule` crate.

mod builder;
mod rule;

pub use builder::{Frequency, RecurrenceSpec};
pub use rule::RecurrenceRule;
