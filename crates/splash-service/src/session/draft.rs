use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use splash_core::types::{Location, Session, SessionStatus};
use splash_rfc::rfc::recurrence::{RecurrenceRule, RecurrenceSpec};
use splash_rfc::rfc::tz::InstantBuilder;

use crate::error::{ServiceError, ServiceResult};
use crate::policy::BookingPolicy;

/// How a new session recurs: structured form fields or raw rule text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecurrenceInput {
    Spec(RecurrenceSpec),
    Rule(String),
}

/// A session as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub recurrence: Option<RecurrenceInput>,
    /// Defaults to `draft`.
    #[serde(default)]
    pub status: SessionStatus,
}

impl SessionDraft {
    /// ## Summary
    /// Checks the draft against `location` and turns it into a new session
    /// with a fresh id and the requested status.
    ///
    /// ## Errors
    /// - `ServiceError::ValidationError` for an empty title or a start date
    ///   before the location's current date
    /// - `CoreError::ValidationError` if the end time is not after the start time
    /// - `RfcError` if the zone is unknown or the recurrence does not parse
    pub fn into_session(
        self,
        location: &Location,
        now: DateTime<Utc>,
        policy: &BookingPolicy,
    ) -> ServiceResult<Session> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ServiceError::ValidationError(
                "Title is required".to_string(),
            ));
        }

        let builder = InstantBuilder::new(&location.timezone, policy.dst_policy)?;

        let rule_text = match self.recurrence {
            None => None,
            Some(RecurrenceInput::Spec(spec)) => Some(spec.to_rule_text(&builder)?),
            Some(RecurrenceInput::Rule(text)) => {
                Some(text.trim().to_string()).filter(|text| !text.is_empty())
            }
        };
        if let Some(text) = &rule_text {
            RecurrenceRule::parse(
                text,
                self.start_date.and_time(self.start_time),
                builder.timezone(),
            )?;
        }

        let today = builder.local_date(now);
        if self.start_date < today {
            return Err(ServiceError::ValidationError(format!(
                "Start date {} is before {today}",
                self.start_date
            )));
        }

        let session = Session {
            id: uuid::Uuid::now_v7(),
            location_id: location.id,
            title: title.to_string(),
            description: self
                .description
                .map(|description| description.trim().to_string())
                .filter(|description| !description.is_empty()),
            start_date: self.start_date,
            start_time: self.start_time,
            end_time: self.end_time,
            recurrence_rule: rule_text,
            status: self.status,
        };
        session.check_times()?;

        Ok(session)
    }
}
