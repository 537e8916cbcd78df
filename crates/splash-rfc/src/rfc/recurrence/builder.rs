use chrono::{NaiveDate, NaiveTime, Weekday};
use rrule::{RRule, Unvalidated};
use serde::Deserialize;

use crate::error::{RfcError, RfcResult};
use crate::rfc::tz::InstantBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

/// Structured recurrence as entered on the session form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceSpec {
    pub frequency: Frequency,
    #[serde(default)]
    pub interval: Option<u16>,
    #[serde(default)]
    pub by_weekday: Vec<Weekday>,
    #[serde(default)]
    pub by_month_day: Vec<u8>,
    #[serde(default)]
    pub by_month: Vec<u8>,
    /// Last local calendar day on which the session may recur.
    #[serde(default)]
    pub until: Option<NaiveDate>,
}

impl RecurrenceSpec {
    /// ## Summary
    /// Renders this recurrence as `RRULE` text. `UNTIL` becomes the last second
    /// of the `until` day in the location's zone, expressed in UTC.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidRuleFormat` if a field is out of range or the
    /// rendered rule does not parse.
    pub fn to_rule_text(&self, builder: &InstantBuilder) -> RfcResult<String> {
        let mut text = format!("FREQ={}", self.frequency.as_str());

        if let Some(interval) = self.interval {
            if interval == 0 {
                return Err(RfcError::InvalidRuleFormat(
                    "Interval must be at least 1".to_string(),
                ));
            }
            text.push_str(&format!(";INTERVAL={interval}"));
        }

        if !self.by_weekday.is_empty() {
            let days: Vec<&str> = self.by_weekday.iter().map(|day| weekday_code(*day)).collect();
            text.push_str(&format!(";BYDAY={}", days.join(",")));
        }

        if !self.by_month_day.is_empty() {
            if let Some(bad) = self.by_month_day.iter().find(|day| !(1..=31).contains(*day)) {
                return Err(RfcError::InvalidRuleFormat(format!(
                    "Month day out of range: {bad}"
                )));
            }
            text.push_str(&format!(";BYMONTHDAY={}", join_numbers(&self.by_month_day)));
        }

        if !self.by_month.is_empty() {
            if let Some(bad) = self.by_month.iter().find(|month| !(1..=12).contains(*month)) {
                return Err(RfcError::InvalidRuleFormat(format!(
                    "Month out of range: {bad}"
                )));
            }
            text.push_str(&format!(";BYMONTH={}", join_numbers(&self.by_month)));
        }

        if let Some(until) = self.until {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).ok_or_else(|| {
                RfcError::InvalidRuleFormat("unrepresentable end of day".to_string())
            })?;
            let until_utc = builder.build(until, end_of_day)?;
            text.push_str(&format!(";UNTIL={}", until_utc.format("%Y%m%dT%H%M%SZ")));
        }

        text.parse::<RRule<Unvalidated>>()
            .map_err(|err| RfcError::InvalidRuleFormat(err.to_string()))?;

        tracing::debug!(rrule = %text, "Built recurrence rule");

        Ok(text)
    }
}

const fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

fn join_numbers(values: &[u8]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
