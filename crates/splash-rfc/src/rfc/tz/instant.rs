use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use splash_core::types::DstPolicy;

use super::{ConversionError, resolve_timezone};

/// Longest span searched backwards for the offset in effect before a DST gap.
/// Covers whole-day jumps such as Pacific/Apia in December 2011.
const GAP_SEARCH_HOURS: i64 = 48;

/// Converts between a location's wall clock and absolute UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantBuilder {
    tz: Tz,
    policy: DstPolicy,
}

impl InstantBuilder {
    /// ## Summary
    /// Creates a builder for the given timezone identifier.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if the identifier cannot be resolved.
    pub fn new(tzid: &str, policy: DstPolicy) -> Result<Self, ConversionError> {
        Ok(Self::from_tz(resolve_timezone(tzid)?, policy))
    }

    #[must_use]
    pub const fn from_tz(tz: Tz, policy: DstPolicy) -> Self {
        Self { tz, policy }
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub const fn policy(&self) -> DstPolicy {
        self.policy
    }

    /// ## Summary
    /// Interprets `date` + `time` as wall clock in this builder's zone and
    /// returns the absolute instant.
    ///
    /// A repeated wall time (DST fold) resolves to its first instant. A
    /// skipped wall time (DST gap) uses the offset in effect before the gap
    /// under `DstPolicy::Rfc5545`, and is an error under `DstPolicy::Reject`.
    ///
    /// ## Errors
    /// Returns `ConversionError::NonExistentTime` for a skipped wall time under
    /// `DstPolicy::Reject`.
    pub fn build(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, ConversionError> {
        self.resolve(date.and_time(time), self.policy)
    }

    /// ## Summary
    /// Returns the local wall-clock date-time of `instant` in this builder's zone.
    #[must_use]
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// ## Summary
    /// Returns the local calendar date of `instant` in this builder's zone.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date()
    }

    /// ## Summary
    /// Returns the UTC range covering the local calendar days `first..=last`,
    /// from `first 00:00:00` to `last 23:59:59` local time.
    ///
    /// Bounds always use the RFC 5545 gap rule, so a zone whose midnight falls
    /// into a DST gap still yields a usable window.
    ///
    /// ## Errors
    /// Returns `ConversionError::InvalidDateTime` if the range cannot be represented.
    pub fn day_bounds(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), ConversionError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| ConversionError::InvalidDateTime("23:59:59".to_string()))?;
        let start = self.resolve(first.and_time(NaiveTime::MIN), DstPolicy::Rfc5545)?;
        let end = self.resolve(last.and_time(end_of_day), DstPolicy::Rfc5545)?;
        Ok((start, end))
    }

    fn resolve(
        &self,
        local: NaiveDateTime,
        policy: DstPolicy,
    ) -> Result<DateTime<Utc>, ConversionError> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(first, _second) => {
                tracing::trace!(%local, tz = %self.tz, "Wall time repeated by DST fold, using first instant");
                Ok(first.with_timezone(&Utc))
            }
            LocalResult::None => match policy {
                DstPolicy::Reject => Err(ConversionError::NonExistentTime(format!(
                    "{local} in timezone {}",
                    self.tz
                ))),
                DstPolicy::Rfc5545 => {
                    let offset = self.offset_before_gap(local)?;
                    tracing::trace!(%local, tz = %self.tz, %offset, "Wall time skipped by DST gap, using prior offset");
                    let utc = local
                        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
                        .ok_or_else(|| ConversionError::InvalidDateTime(local.to_string()))?;
                    Ok(DateTime::from_naive_utc_and_offset(utc, Utc))
                }
            },
        }
    }

    fn offset_before_gap(&self, local: NaiveDateTime) -> Result<FixedOffset, ConversionError> {
        (1..=GAP_SEARCH_HOURS)
            .filter_map(|hours| local.checked_sub_signed(TimeDelta::hours(hours)))
            .find_map(|earlier| self.tz.from_local_datetime(&earlier).earliest())
            .map(|dt| dt.offset().fix())
            .ok_or_else(|| ConversionError::InvalidDateTime(format!("{local} in timezone {}", self.tz)))
    }
}

/// ## Summary
/// Combines a calendar date and wall-clock time in zone `tzid` into a UTC instant,
/// using the RFC 5545 DST rule.
///
/// ## Errors
/// Returns `ConversionError::UnknownTimezone` if `tzid` cannot be resolved.
pub fn build_instant(
    date: NaiveDate,
    time: NaiveTime,
    tzid: &str,
) -> Result<DateTime<Utc>, ConversionError> {
    InstantBuilder::new(tzid, DstPolicy::Rfc5545)?.build(date, time)
}

/// ## Summary
/// Splits a UTC instant into the local calendar date and wall-clock time of zone `tzid`.
///
/// ## Errors
/// Returns `ConversionError::UnknownTimezone` if `tzid` cannot be resolved.
pub fn instant_to_local(
    instant: DateTime<Utc>,
    tzid: &str,
) -> Result<(NaiveDate, NaiveTime), ConversionError> {
    let local = InstantBuilder::new(tzid, DstPolicy::Rfc5545)?.to_local(instant);
    Ok((local.date(), local.time()))
}
