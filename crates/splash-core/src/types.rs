//! Domain types shared by every layer, free of database and HTTP dependencies.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Lifecycle state of a session. Only `Active` sessions are reservable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Draft,
    Active,
    Disabled,
}

impl SessionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    #[must_use]
    pub const fn is_reservable(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            other => Err(CoreError::ParseError(format!(
                "unknown session status: {other}"
            ))),
        }
    }
}

/// How wall-clock times that a DST transition skips or repeats are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// RFC 5545 §3.3.5: repeated times take the first instant, skipped times
    /// use the offset in effect before the gap.
    #[default]
    Rfc5545,
    /// Skipped times are an error; repeated times still take the first instant.
    Reject,
}

/// A venue owning sessions. All session wall-clock times are read in `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: uuid::Uuid,
    pub organization_id: uuid::Uuid,
    pub name: String,
    /// IANA zone identifier, e.g. `America/Los_Angeles`.
    pub timezone: String,
}

/// A bookable template: a single slot, or a recurring one when `recurrence_rule` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: uuid::Uuid,
    pub location_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub recurrence_rule: Option<String>,
    pub status: SessionStatus,
}

impl Session {
    /// Whether the session carries a non-blank recurrence rule.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule().is_some()
    }

    /// The trimmed rule text, treating blank text as absent.
    #[must_use]
    pub fn recurrence_rule(&self) -> Option<&str> {
        self.recurrence_rule
            .as_deref()
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
    }

    /// ## Summary
    /// Checks that the session ends strictly after it starts.
    ///
    /// ## Errors
    /// Returns `ValidationError` when `end_time <= start_time`.
    pub fn check_times(&self) -> CoreResult<()> {
        if self.end_time <= self.start_time {
            return Err(CoreError::ValidationError(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(())
    }
}

/// A session joined with the location that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session: Session,
    pub location: Location,
}

/// One concrete, non-persisted slot of a session.
///
/// `occurrence_id` is the UTC epoch-seconds of `start` and is the stable key
/// clients use to refer to this slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub session_id: uuid::Uuid,
    pub occurrence_id: i64,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A persisted booking of one occurrence by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub session_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub instance_datetime: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reservation request that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewReservation {
    pub session_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub instance_datetime: DateTime<Utc>,
}
