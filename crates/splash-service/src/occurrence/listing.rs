use chrono::NaiveDate;
use splash_core::types::{Occurrence, SessionContext};
use splash_rfc::error::RfcError;

use crate::booking::LocationSessions;
use crate::error::{ServiceError, ServiceResult};
use crate::policy::BookingPolicy;

use super::generate;

/// ## Summary
/// Bookable occurrences of every active session at a location, merged and
/// ordered by start, then session id.
///
/// A session whose stored rule or zone is broken is logged and left out so the
/// rest of the location still lists.
///
/// ## Errors
/// - `ServiceError::ValidationError` if the window exceeds the policy maximum
/// - `RfcError::RuleLimitExceeded` if any session matches more days than the
///   policy allows
#[tracing::instrument(
    skip(location, policy),
    fields(location_id = %location.location.id, sessions = location.sessions.len())
)]
pub fn generate_for_location(
    location: &LocationSessions,
    window_start: NaiveDate,
    window_end: NaiveDate,
    policy: &BookingPolicy,
) -> ServiceResult<Vec<Occurrence>> {
    if window_end < window_start {
        return Ok(Vec::new());
    }
    policy.check_window(window_start, window_end)?;

    let mut occurrences = Vec::new();
    for session in location
        .sessions
        .iter()
        .filter(|session| session.status.is_reservable())
    {
        let context = SessionContext {
            session: session.clone(),
            location: location.location.clone(),
        };
        match generate(&context, window_start, window_end, policy) {
            Ok(found) => occurrences.extend(found),
            Err(err @ ServiceError::RfcError(RfcError::RuleLimitExceeded(_))) => return Err(err),
            Err(ServiceError::RfcError(err)) => {
                tracing::warn!(session_id = %session.id, error = %err, "Skipping session with invalid schedule");
            }
            Err(err) => return Err(err),
        }
    }

    occurrences.sort_by_key(|occurrence| (occurrence.start, occurrence.session_id));
    Ok(occurrences)
}
