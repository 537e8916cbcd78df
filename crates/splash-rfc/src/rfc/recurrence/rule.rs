use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{RfcError, RfcResult};
use crate::rfc::tz::InstantBuilder;

/// A parsed recurrence rule set, anchored at its `DTSTART`.
///
/// Stored rule text comes in three shapes: a bare rule (`FREQ=WEEKLY;BYDAY=MO`),
/// an `RRULE:` line, or a full set that already carries `DTSTART[;TZID=..]`.
/// The first two are anchored at the session's own start; the last keeps its
/// own anchor.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    rrule_set: RRuleSet,
    explicit_start: bool,
}

impl RecurrenceRule {
    /// ## Summary
    /// Parses rule text. Text without a `DTSTART` line is anchored at `anchor`,
    /// a wall-clock date-time in `tz`.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidRuleFormat` if the text cannot be parsed or
    /// fails validation.
    pub fn parse(text: &str, anchor: NaiveDateTime, tz: Tz) -> RfcResult<Self> {
        let explicit_start = has_dtstart(text);
        let rruleset_text = if explicit_start {
            text.trim().to_string()
        } else {
            compose_with_anchor(text, anchor, tz)?
        };

        tracing::trace!(rrule = %rruleset_text, explicit_start, "Parsing recurrence rule");

        let rrule_set = rruleset_text
            .parse::<RRuleSet>()
            .map_err(|err| RfcError::InvalidRuleFormat(err.to_string()))?;

        Ok(Self {
            rrule_set,
            explicit_start,
        })
    }

    /// Whether the rule text carried its own `DTSTART`.
    #[must_use]
    pub const fn has_explicit_start(&self) -> bool {
        self.explicit_start
    }

    /// ## Summary
    /// Enumerates occurrence starts in `[start, end]` (or `(start, end)` when
    /// `inclusive` is false), ascending.
    ///
    /// The window must be finite; rules without `UNTIL` or `COUNT` are fine
    /// because the window bounds them.
    ///
    /// ## Errors
    /// Returns `RfcError::RuleLimitExceeded` if the window holds more than
    /// `limit` occurrences.
    pub fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        inclusive: bool,
        limit: u16,
    ) -> RfcResult<Vec<DateTime<Utc>>> {
        if end < start {
            return Ok(Vec::new());
        }

        // Widen by a second on both sides, then apply the exact bounds below.
        let after = (start - TimeDelta::seconds(1)).with_timezone(&rrule::Tz::UTC);
        let before = (end + TimeDelta::seconds(1)).with_timezone(&rrule::Tz::UTC);

        let result = self.rrule_set.clone().after(after).before(before).all(limit);
        if result.limited {
            tracing::debug!(limit, %start, %end, "Recurrence expansion hit limit");
            return Err(RfcError::RuleLimitExceeded(limit));
        }

        let occurrences: Vec<DateTime<Utc>> = result
            .dates
            .iter()
            .map(|dt| dt.with_timezone(&Utc))
            .filter(|dt| {
                if inclusive {
                    *dt >= start && *dt <= end
                } else {
                    *dt > start && *dt < end
                }
            })
            .collect();

        tracing::trace!(count = occurrences.len(), %start, %end, "Expanded recurrence window");

        Ok(occurrences)
    }

    /// ## Summary
    /// Local calendar days in `[first, last]`, in the builder's zone, on which
    /// the rule fires at least once. Ascending, without repeats.
    ///
    /// `limit` caps the number of distinct days, not raw matches, so a rule
    /// firing several times a day costs one unit per day.
    ///
    /// ## Errors
    /// Returns `RfcError::RuleLimitExceeded` if more than `limit` days match,
    /// or a conversion error if the bounds cannot be expressed in UTC.
    pub fn local_days(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        builder: &InstantBuilder,
        limit: u16,
    ) -> RfcResult<Vec<NaiveDate>> {
        if last < first {
            return Ok(Vec::new());
        }
        let (start, end) = builder.day_bounds(first, last)?;

        let mut days: Vec<NaiveDate> = Vec::new();
        for occurrence in &self.rrule_set {
            let instant = occurrence.with_timezone(&Utc);
            if instant < start {
                continue;
            }
            if instant > end {
                break;
            }

            let day = builder.local_date(instant);
            if day < first || day > last || days.last().is_some_and(|seen| *seen >= day) {
                continue;
            }
            if days.len() >= usize::from(limit) {
                tracing::debug!(limit, %first, %last, "Recurrence day count hit limit");
                return Err(RfcError::RuleLimitExceeded(limit));
            }
            days.push(day);
        }

        tracing::trace!(count = days.len(), %first, %last, "Collected recurrence days");
        Ok(days)
    }

    /// ## Summary
    /// Checks whether the rule produces an occurrence on local calendar day
    /// `date` in the builder's zone.
    ///
    /// ## Errors
    /// Returns an error if the day cannot be expressed in UTC.
    pub fn occurs_on(&self, date: NaiveDate, builder: &InstantBuilder, limit: u16) -> RfcResult<bool> {
        Ok(!self.local_days(date, date, builder, limit.max(1))?.is_empty())
    }
}

fn has_dtstart(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim_start().to_ascii_uppercase().starts_with("DTSTART"))
}

/// Prefixes a `DTSTART;TZID=` line and turns bare rule lines into `RRULE:` lines.
fn compose_with_anchor(text: &str, anchor: NaiveDateTime, tz: Tz) -> RfcResult<String> {
    let mut lines = vec![format!(
        "DTSTART;TZID={tz}:{}",
        anchor.format("%Y%m%dT%H%M%S")
    )];

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.contains(':') {
            lines.push(line.to_string());
        } else {
            lines.push(format!("RRULE:{line}"));
        }
    }

    if lines.len() == 1 {
        return Err(RfcError::InvalidRuleFormat("empty rule".to_string()));
    }

    Ok(lines.join("\n"))
}
