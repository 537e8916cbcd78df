use serde::Serialize;

/// Why a booking request was refused.
///
/// Every variant is an expected outcome the caller can act on, and each has a
/// stable [`code`](Rejection::code) for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("The session's recurrence rule is invalid")]
    InvalidRuleFormat,

    #[error("The location's timezone is not recognized")]
    UnknownTimezone,

    #[error("Cannot reserve an occurrence in the past")]
    InThePast,

    #[error("Session is not open for reservations")]
    SessionNotActive,

    #[error("The session does not occur on the requested date")]
    NoMatchingOccurrence,

    #[error("Session not found or you don't have access to it")]
    NotFoundOrForbidden,

    #[error("You have already reserved this occurrence")]
    DuplicateReservation,
}

impl Rejection {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidRuleFormat => "invalid_rule_format",
            Self::UnknownTimezone => "unknown_timezone",
            Self::InThePast => "in_the_past",
            Self::SessionNotActive => "session_not_active",
            Self::NoMatchingOccurrence => "no_matching_occurrence",
            Self::NotFoundOrForbidden => "not_found_or_forbidden",
            Self::DuplicateReservation => "duplicate_reservation",
        }
    }
}
