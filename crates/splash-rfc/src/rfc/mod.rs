pub mod recurrence;
pub mod tz;
