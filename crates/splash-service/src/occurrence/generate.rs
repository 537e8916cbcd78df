use chrono::NaiveDate;
use splash_core::types::{DstPolicy, Occurrence, SessionContext};
use splash_rfc::error::RfcError;
use splash_rfc::rfc::recurrence::RecurrenceRule;
use splash_rfc::rfc::tz::{ConversionError, InstantBuilder};

use crate::error::ServiceResult;
use crate::policy::BookingPolicy;

/// ## Summary
/// Expands a session into the occurrences whose local start date falls in
/// `window_start..=window_end`, ascending by start.
///
/// A session without a rule has one occurrence, on its start date. For a
/// recurring session the rule decides which local days recur and the session's
/// own start and end times give the time of day. At most one occurrence is
/// produced per local day. The occurrence id is the start's epoch seconds.
///
/// ## Errors
/// - `RfcError::InvalidRuleFormat` if the stored rule does not parse
/// - `ConversionError::UnknownTimezone` if the location zone is unknown
/// - `ServiceError::ValidationError` if the window exceeds the policy maximum
/// - `RfcError::RuleLimitExceeded` if the rule recurs on more local days than
///   the policy's occurrence cap
#[tracing::instrument(
    skip(context, policy),
    fields(session_id = %context.session.id, tz = %context.location.timezone)
)]
pub fn generate(
    context: &SessionContext,
    window_start: NaiveDate,
    window_end: NaiveDate,
    policy: &BookingPolicy,
) -> ServiceResult<Vec<Occurrence>> {
    if window_end < window_start {
        return Ok(Vec::new());
    }
    policy.check_window(window_start, window_end)?;

    let builder = InstantBuilder::new(&context.location.timezone, policy.dst_policy)?;
    let dates = occurrence_dates(context, &builder, window_start, window_end, policy)?;

    let session = &context.session;
    let mut occurrences = Vec::with_capacity(dates.len());
    for date in dates {
        let start = match builder.build(date, session.start_time) {
            Ok(start) => start,
            Err(ConversionError::NonExistentTime(local)) if policy.dst_policy == DstPolicy::Reject => {
                tracing::debug!(%local, "Skipping occurrence whose start falls in a DST gap");
                continue;
            }
            Err(err) => return Err(RfcError::from(err).into()),
        };
        let end = match builder.build(date, session.end_time) {
            Ok(end) => end,
            Err(ConversionError::NonExistentTime(local)) if policy.dst_policy == DstPolicy::Reject => {
                tracing::debug!(%local, "Skipping occurrence whose end falls in a DST gap");
                continue;
            }
            Err(err) => return Err(RfcError::from(err).into()),
        };

        tracing::trace!(%date, %start, %end, "Built occurrence");
        occurrences.push(Occurrence {
            session_id: session.id,
            occurrence_id: start.timestamp(),
            name: session.title.clone(),
            start,
            end,
        });
    }

    occurrences.sort_by_key(|occurrence| occurrence.start);
    Ok(occurrences)
}

/// Local calendar days in the window on which the session occurs, ascending
/// and without repeats.
fn occurrence_dates(
    context: &SessionContext,
    builder: &InstantBuilder,
    window_start: NaiveDate,
    window_end: NaiveDate,
    policy: &BookingPolicy,
) -> ServiceResult<Vec<NaiveDate>> {
    let session = &context.session;
    let in_window = |date: &NaiveDate| (window_start..=window_end).contains(date);

    let Some(rule_text) = session.recurrence_rule() else {
        return Ok(Some(session.start_date).filter(in_window).into_iter().collect());
    };

    let rule = RecurrenceRule::parse(
        rule_text,
        session.start_date.and_time(session.start_time),
        builder.timezone(),
    )?;
    let dates = rule.local_days(window_start, window_end, builder, policy.max_occurrences)?;

    tracing::debug!(count = dates.len(), "Rule matched local days");
    Ok(dates)
}
