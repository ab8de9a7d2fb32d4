//! Schedule time parsing.
//!
//! Clients submit the target time as a naive local datetime (the HTML
//! `datetime-local` shape) or as raw epoch milliseconds. Naive times are
//! interpreted in the configured posting timezone and converted to a UTC
//! instant exactly once, at submission; the stored instant never changes.

use crate::errors::PublishError;
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a client-supplied schedule time into epoch milliseconds UTC
pub fn parse_schedule_time(input: &str, tz: Tz) -> Result<i64, PublishError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PublishError::validation(
            "schedule_time",
            "must not be empty",
        ));
    }

    // Raw epoch millis pass straight through
    if let Ok(millis) = input.parse::<i64>() {
        if millis <= 0 {
            return Err(PublishError::validation(
                "schedule_time",
                "epoch milliseconds must be positive",
            ));
        }
        return Ok(millis);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| {
            PublishError::validation(
                "schedule_time",
                &format!("could not parse '{}' as a datetime", input),
            )
        })?;

    // Ambiguous local times (DST fold) resolve to the earlier instant
    let local = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        PublishError::validation(
            "schedule_time",
            &format!("'{}' does not exist in timezone {}", input, tz),
        )
    })?;

    Ok(local.with_timezone(&Utc).timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_local_format() {
        let tz: Tz = "Africa/Cairo".parse().unwrap();
        let millis = parse_schedule_time("2026-01-10T12:00", tz).unwrap();

        // Cairo is UTC+2 in January, so local noon is 10:00 UTC
        let utc = Utc.timestamp_millis_opt(millis).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-01-10T10:00:00+00:00");
    }

    #[test]
    fn test_parse_with_seconds_and_space() {
        let tz: Tz = "UTC".parse().unwrap();
        let a = parse_schedule_time("2026-01-10T12:00:30", tz).unwrap();
        let b = parse_schedule_time("2026-01-10 12:00:30", tz).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_epoch_millis() {
        let tz: Tz = "Africa/Cairo".parse().unwrap();
        assert_eq!(parse_schedule_time("1771234567000", tz).unwrap(), 1771234567000);
    }

    #[test]
    fn test_rejects_garbage() {
        let tz: Tz = "UTC".parse().unwrap();
        assert!(parse_schedule_time("not a time", tz).is_err());
        assert!(parse_schedule_time("", tz).is_err());
        assert!(parse_schedule_time("-5", tz).is_err());
    }
}
