use chrono::{DateTime, Utc};
use splash_core::types::{DstPolicy, SessionContext};
use splash_rfc::rfc::recurrence::RecurrenceRule;
use splash_rfc::rfc::tz::{ConversionError, InstantBuilder};

use crate::booking::Rejection;
use crate::policy::BookingPolicy;

/// ## Summary
/// Decides whether `proposed` is a real occurrence of the session.
///
/// Checks run in order: the instant is not before `now`, the session is
/// active, and the session occurs on the proposed instant's local calendar
/// date. Only the date is compared; the time of day is taken as given. A
/// recurring session only matches dates up to `now + policy.lookahead`.
///
/// ## Errors
/// Returns the first [`Rejection`] that applies.
#[tracing::instrument(
    skip(context, policy),
    fields(session_id = %context.session.id, status = %context.session.status)
)]
pub fn validate(
    context: &SessionContext,
    proposed: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &BookingPolicy,
) -> Result<(), Rejection> {
    if proposed < now {
        return Err(Rejection::InThePast);
    }

    let session = &context.session;
    if !session.status.is_reservable() {
        return Err(Rejection::SessionNotActive);
    }

    let builder = InstantBuilder::new(&context.location.timezone, policy.dst_policy).map_err(
        |err| {
            tracing::warn!(error = %err, location_id = %context.location.id, "Stored location timezone is invalid");
            Rejection::UnknownTimezone
        },
    )?;
    let date = builder.local_date(proposed);

    match session.recurrence_rule() {
        None => {
            if date != session.start_date {
                tracing::debug!(%date, start_date = %session.start_date, "Proposed date is not the session date");
                return Err(Rejection::NoMatchingOccurrence);
            }
        }
        Some(rule_text) => {
            let horizon = builder.local_date(policy.horizon(now));
            if date > horizon {
                tracing::debug!(%date, %horizon, "Proposed date is beyond the booking horizon");
                return Err(Rejection::NoMatchingOccurrence);
            }

            let rule = RecurrenceRule::parse(
                rule_text,
                session.start_date.and_time(session.start_time),
                builder.timezone(),
            )
            .map_err(|err| {
                tracing::warn!(error = %err, "Stored recurrence rule is invalid");
                Rejection::InvalidRuleFormat
            })?;

            match rule.occurs_on(date, &builder, policy.max_occurrences) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(%date, "Rule has no occurrence on proposed date");
                    return Err(Rejection::NoMatchingOccurrence);
                }
                Err(err) => {
                    tracing::warn!(error = %err, %date, "Could not evaluate rule on proposed date");
                    return Err(Rejection::NoMatchingOccurrence);
                }
            }
        }
    }

    if policy.dst_policy == DstPolicy::Reject {
        match builder.build(date, session.start_time) {
            Ok(_) => {}
            Err(ConversionError::NonExistentTime(local)) => {
                tracing::debug!(%local, "Occurrence start falls in a DST gap");
                return Err(Rejection::NoMatchingOccurrence);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Could not build occurrence start");
                return Err(Rejection::NoMatchingOccurrence);
            }
        }
    }

    Ok(())
}
