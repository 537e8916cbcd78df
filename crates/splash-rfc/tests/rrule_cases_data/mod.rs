use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::rfc::recurrence::RecurrenceRule;

pub struct RRuleCase {
    pub name: &'static str,
    pub rule: &'static str,
    /// Local anchor (`YYYY-MM-DDTHH:MM:SS`) used when the rule has no `DTSTART`.
    pub anchor: &'static str,
    pub tz: Tz,
    pub window: (&'static str, &'static str),
    pub expected: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
}

#[expect(clippy::too_many_lines)]
pub fn rrule_cases() -> Vec<RRuleCase> {
    vec![
        RRuleCase {
            name: "daily_count",
            rule: "FREQ=DAILY;COUNT=3",
            anchor: "2012-02-01T09:30:00",
            tz: Tz::UTC,
            window: ("2012-01-01T00:00:00+00:00", "2012-12-31T00:00:00+00:00"),
            expected: Some(&[
                "2012-02-01T09:30:00+00:00",
                "2012-02-02T09:30:00+00:00",
                "2012-02-03T09:30:00+00:00",
            ]),
            expected_len: None,
        },
        RRuleCase {
            name: "weekly_tue_thu",
            rule: "FREQ=WEEKLY;COUNT=3;BYDAY=TU,TH",
            anchor: "1997-09-02T09:00:00",
            tz: Tz::UTC,
            window: ("1997-09-01T00:00:00+00:00", "1997-12-31T00:00:00+00:00"),
            expected: Some(&[
                "1997-09-02T09:00:00+00:00",
                "1997-09-04T09:00:00+00:00",
                "1997-09-09T09:00:00+00:00",
            ]),
            expected_len: None,
        },
        RRuleCase {
            name: "weekly_keeps_wall_time_across_dst",
            rule: "FREQ=WEEKLY;BYDAY=SA",
            anchor: "2025-10-25T07:00:00",
            tz: Tz::America__New_York,
            window: ("2025-10-25T00:00:00+00:00", "2025-11-09T00:00:00+00:00"),
            expected: Some(&[
                "2025-10-25T07:00:00-04:00",
                "2025-11-01T07:00:00-04:00",
                "2025-11-08T07:00:00-05:00",
            ]),
            expected_len: None,
        },
        RRuleCase {
            name: "biweekly_mon_wed_fri",
            rule: "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR",
            anchor: "2025-06-02T06:00:00",
            tz: Tz::Europe__London,
            window: ("2025-06-01T00:00:00+00:00", "2025-06-30T23:59:59+00:00"),
            expected: Some(&[
                "2025-06-02T06:00:00+01:00",
                "2025-06-04T06:00:00+01:00",
                "2025-06-06T06:00:00+01:00",
                "2025-06-16T06:00:00+01:00",
                "2025-06-18T06:00:00+01:00",
                "2025-06-20T06:00:00+01:00",
                "2025-06-30T06:00:00+01:00",
            ]),
            expected_len: None,
        },
        RRuleCase {
            name: "monthly_first_and_fifteenth",
            rule: "FREQ=MONTHLY;BYMONTHDAY=1,15",
            anchor: "2025-01-01T18:00:00",
            tz: Tz::America__Los_Angeles,
            window: ("2025-01-01T00:00:00+00:00", "2025-03-31T00:00:00+00:00"),
            expected: Some(&[
                "2025-01-01T18:00:00-08:00",
                "2025-01-15T18:00:00-08:00",
                "2025-02-01T18:00:00-08:00",
                "2025-02-15T18:00:00-08:00",
                "2025-03-01T18:00:00-08:00",
                "2025-03-15T18:00:00-07:00",
            ]),
            expected_len: None,
        },
        RRuleCase {
            name: "until_bounds_open_rule",
            rule: "FREQ=DAILY;UNTIL=20250110T235959Z",
            anchor: "2025-01-01T12:00:00",
            tz: Tz::UTC,
            window: ("2024-01-01T00:00:00+00:00", "2026-01-01T00:00:00+00:00"),
            expected: None,
            expected_len: Some(10),
        },
        RRuleCase {
            name: "open_rule_bounded_by_window",
            rule: "FREQ=DAILY",
            anchor: "2025-01-01T12:00:00",
            tz: Tz::UTC,
            window: ("2025-03-01T00:00:00+00:00", "2025-03-31T23:59:59+00:00"),
            expected: None,
            expected_len: Some(31),
        },
        RRuleCase {
            name: "explicit_dtstart_utc",
            rule: "DTSTART:20250601T090000Z\nRRULE:FREQ=WEEKLY;COUNT=2",
            anchor: "1999-01-01T00:00:00",
            tz: Tz::Asia__Tokyo,
            window: ("2025-05-01T00:00:00+00:00", "2025-07-01T00:00:00+00:00"),
            expected: Some(&["2025-06-01T09:00:00+00:00", "2025-06-08T09:00:00+00:00"]),
            expected_len: None,
        },
        RRuleCase {
            name: "window_before_anchor",
            rule: "FREQ=WEEKLY;BYDAY=MO",
            anchor: "2025-06-02T09:00:00",
            tz: Tz::UTC,
            window: ("2025-01-01T00:00:00+00:00", "2025-05-31T00:00:00+00:00"),
            expected: None,
            expected_len: Some(0),
        },
    ]
}

pub fn assert_case(case: &RRuleCase) {
    let anchor = NaiveDateTime::parse_from_str(case.anchor, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|err| panic!("Failed to parse anchor for {}: {}", case.name, err));

    let rule = RecurrenceRule::parse(case.rule, anchor, case.tz)
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));

    let start = parse_rfc3339(case.window.0).with_timezone(&Utc);
    let end = parse_rfc3339(case.window.1).with_timezone(&Utc);

    let dates = rule
        .between(start, end, true, 500)
        .unwrap_or_else(|err| panic!("Failed to expand {}: {}", case.name, err));
    let actual_timestamps: Vec<i64> = dates.iter().map(DateTime::timestamp).collect();

    if let Some(expected) = case.expected {
        let expected_timestamps: Vec<i64> = expected
            .iter()
            .map(|value| parse_rfc3339(value).timestamp())
            .collect();
        assert_eq!(
            actual_timestamps, expected_timestamps,
            "Case {} did not match",
            case.name
        );
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            dates.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}

fn parse_rfc3339(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap_or_else(|err| {
        panic!("Failed to parse rfc3339 value {value}: {err}")
    })
}
