use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::str::FromStr;

use super::ConversionError;

/// ## Summary
/// Resolves a timezone identifier to a `chrono_tz::Tz`.
///
/// Identifiers are canonicalized first, so IANA aliases and Windows zone
/// names stored by older clients still resolve.
///
/// ## Errors
///
/// Returns `ConversionError::UnknownTimezone` if the identifier cannot be resolved.
pub fn resolve_timezone(tzid: &str) -> Result<Tz, ConversionError> {
    let trimmed = tzid.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::UnknownTimezone(tzid.to_string()));
    }

    let normalized = normalize_tzid(trimmed);

    Tz::from_str(&normalized).map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))
}

/// Normalizes timezone identifiers to canonical IANA names.
///
/// Uses ICU4X for Windows timezone ID mapping and IANA canonicalization.
fn normalize_tzid(tzid: &str) -> String {
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(tzid, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Handles aliases like Europe/Kiev -> Europe/Kyiv
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(tzid);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    tzid.to_string()
}
