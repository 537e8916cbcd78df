use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use splash_core::config::BookingConfig;
use splash_core::types::DstPolicy;

use crate::error::{ServiceError, ServiceResult};

/// Tunables for occurrence generation and reservation validation.
///
/// Built once from configuration and passed by value into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// How far past "now" a recurring reservation may be made.
    pub lookahead: TimeDelta,
    /// Largest number of calendar days one generation window may span.
    pub max_window_days: u32,
    /// Cap on rule expansion for a single query.
    pub max_occurrences: u16,
    pub dst_policy: DstPolicy,
}

impl BookingPolicy {
    /// ## Summary
    /// Last instant a recurring reservation may target, relative to `now`.
    #[must_use]
    pub fn horizon(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.lookahead)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// ## Summary
    /// Rejects generation windows wider than `max_window_days`.
    ///
    /// An inverted window is accepted here; generation returns nothing for it.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` if the window is too wide.
    pub fn check_window(&self, start: NaiveDate, end: NaiveDate) -> ServiceResult<()> {
        let days = (end - start).num_days() + 1;
        if days > i64::from(self.max_window_days) {
            return Err(ServiceError::ValidationError(format!(
                "Window of {days} days exceeds the maximum of {}",
                self.max_window_days
            )));
        }
        Ok(())
    }
}

impl From<&BookingConfig> for BookingPolicy {
    fn from(config: &BookingConfig) -> Self {
        Self {
            lookahead: TimeDelta::days(i64::from(config.lookahead_days)),
            max_window_days: config.max_window_days,
            max_occurrences: config.max_occurrences,
            dst_policy: config.dst_policy,
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::from(&BookingConfig::default())
    }
}
