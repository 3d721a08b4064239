//! Date resolver: turns heterogeneous date inputs into concrete instants.
//!
//! Accepts absolute datetimes, Unix epoch seconds, anchored expressions
//! ("yesterday 1:00"), relative expressions ("2 hours ago"), and bare
//! times of day. Everything resolves in the local timezone, matching the
//! storage key format.

use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone,
};
use regex::Regex;

use crate::error::Error;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Plausible Unix-seconds pattern (ten digits, leading 1).
static UNIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^1[0-9]{9}$").unwrap());

/// 12-hour clock times like "3pm" or "3:30 pm".
static MERIDIEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?::([0-5][0-9]))?\s*(am|pm)$").unwrap());

/// Resolved dates further than this from the current year are rejected as
/// fuzzy-parser misfires.
const MAX_YEAR_DIFF: i32 = 10;

/// Datetime formats tried before any fuzzy interpretation.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Resolves an optional expression; `None` means now.
pub fn resolve(expr: Option<&str>) -> Result<DateTime<Local>, Error> {
    expr.map_or_else(|| Ok(Local::now()), resolve_expr)
}

/// Resolves an expression to a plausible local instant.
pub fn resolve_expr(expr: &str) -> Result<DateTime<Local>, Error> {
    let trimmed = expr.trim();
    let date = if UNIX_RE.is_match(trimmed) {
        let secs = trimmed.parse::<i64>().map_err(|_| Error::InvalidDate {
            expr: expr.to_string(),
        })?;
        DateTime::from_timestamp(secs, 0)
            .map(|utc| utc.with_timezone(&Local))
            .ok_or_else(|| Error::InvalidDate {
                expr: expr.to_string(),
            })?
    } else {
        parse_fuzzy(trimmed, Local::now()).ok_or_else(|| Error::InvalidDate {
            expr: expr.to_string(),
        })?
    };
    check_plausibility(&date, expr)?;
    Ok(date)
}

/// Resolves a possibly-partial expression against a fallback date.
///
/// A bare time of day lands on `fallback`'s calendar day, so "18:00"
/// applied to an entry keeps its original date. Anything else resolves
/// like [`resolve_expr`].
pub fn update_date(fallback: &DateTime<Local>, expr: &str) -> Result<DateTime<Local>, Error> {
    let trimmed = expr.trim().to_ascii_lowercase();
    if let Some(time) = parse_time_of_day(&trimmed) {
        return Ok(from_local(fallback.date_naive().and_time(time)));
    }
    resolve_expr(expr)
}

fn parse_fuzzy(expr: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    // RFC 3339 carries its own offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(expr) {
        return Some(dt.with_timezone(&Local));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(expr, format) {
            return Some(from_local(naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return Some(from_local(date.and_time(NaiveTime::MIN)));
    }

    let lower = expr.to_ascii_lowercase();

    if let Some(caps) = RELATIVE_RE.captures(&lower) {
        let n: i64 = caps[1].parse().ok()?;
        let minutes_per_unit = match &caps[2] {
            "minute" => 1,
            "hour" => 60,
            "day" => 60 * 24,
            "week" => 60 * 24 * 7,
            _ => return None,
        };
        let minutes = n.checked_mul(minutes_per_unit)?;
        return now.checked_sub_signed(Duration::minutes(minutes));
    }

    // Anchored expressions, optionally followed by a time of day
    let mut words = lower.splitn(2, char::is_whitespace);
    let anchor = words.next()?;
    let rest = words.next().map(str::trim).unwrap_or("");
    let day = match anchor {
        "now" if rest.is_empty() => return Some(now),
        "today" => now.date_naive(),
        "yesterday" => now.date_naive() - Duration::days(1),
        "tomorrow" => now.date_naive() + Duration::days(1),
        _ => {
            // Bare time of day applies to today
            return parse_time_of_day(&lower).map(|t| from_local(now.date_naive().and_time(t)));
        }
    };
    let time = if rest.is_empty() {
        NaiveTime::MIN
    } else {
        parse_time_of_day(rest)?
    };
    Some(from_local(day.and_time(time)))
}

/// Parses a bare time-of-day expression ("18:00", "6:30:15", "3pm").
pub(crate) fn parse_time_of_day(expr: &str) -> Option<NaiveTime> {
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(expr, format) {
            return Some(time);
        }
    }
    let caps = MERIDIEM_RE.captures(expr)?;
    let hour: u32 = caps[1].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    let hour = match (&caps[3], hour) {
        ("am", 12) => 0,
        ("pm", 12) => 12,
        ("am", h) => h,
        ("pm", h) => h + 12,
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn check_plausibility(date: &DateTime<Local>, expr: &str) -> Result<(), Error> {
    let now = Local::now();
    if (date.year() - now.year()).abs() > MAX_YEAR_DIFF {
        return Err(Error::ImplausibleDate {
            expr: expr.to_string(),
            resolved: date.to_string(),
        });
    }
    Ok(())
}

/// Maps a naive local datetime to an instant.
///
/// Ambiguous datetimes (DST fall-back) resolve to the earlier instant;
/// nonexistent ones (spring-forward gap) fall forward by an hour.
pub(crate) fn from_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(Local::now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_resolves_to_now() {
        let before = Local::now();
        let resolved = resolve(None).unwrap();
        assert!(resolved >= before && resolved <= Local::now());
    }

    #[test]
    fn explicit_datetime_parses() {
        let resolved = resolve_expr("2025-03-14 15:09:26").unwrap();
        assert_eq!(
            resolved.naive_local(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(15, 9, 26)
                .unwrap()
        );
    }

    #[test]
    fn minute_precision_and_date_only_parse() {
        let minute = resolve_expr("2025-03-14 15:09").unwrap();
        assert_eq!(minute.naive_local().and_utc().timestamp() % 60, 0);

        let midnight = resolve_expr("2025-03-14").unwrap();
        assert_eq!(midnight.naive_local().time(), NaiveTime::MIN);
    }

    #[test]
    fn unix_seconds_parse() {
        let resolved = resolve_expr("1741964966").unwrap();
        assert_eq!(resolved.timestamp(), 1_741_964_966);
    }

    #[test]
    fn relative_expressions_resolve_backwards() {
        let resolved = resolve_expr("2 hours ago").unwrap();
        let delta = Local::now() - resolved;
        assert!(delta >= Duration::hours(2) && delta < Duration::hours(2) + Duration::seconds(5));
    }

    #[test]
    fn anchored_expression_with_time() {
        let resolved = resolve_expr("yesterday 1:00").unwrap();
        let expected = Local::now().date_naive() - Duration::days(1);
        assert_eq!(resolved.date_naive(), expected);
        assert_eq!(resolved.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn bare_time_lands_on_today() {
        let resolved = resolve_expr("18:30").unwrap();
        assert_eq!(resolved.date_naive(), Local::now().date_naive());
        assert_eq!(resolved.time(), NaiveTime::from_hms_opt(18, 30, 0).unwrap());
    }

    #[test]
    fn meridiem_times_parse() {
        assert_eq!(
            parse_time_of_day("3pm"),
            NaiveTime::from_hms_opt(15, 0, 0)
        );
        assert_eq!(
            parse_time_of_day("3:30 am"),
            NaiveTime::from_hms_opt(3, 30, 0)
        );
        assert_eq!(parse_time_of_day("12am"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(
            parse_time_of_day("12pm"),
            NaiveTime::from_hms_opt(12, 0, 0)
        );
        assert_eq!(parse_time_of_day("13pm"), None);
    }

    #[test]
    fn gibberish_is_invalid() {
        assert!(matches!(
            resolve_expr("the day the music died"),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn far_away_years_are_implausible() {
        assert!(matches!(
            resolve_expr("1990-01-01"),
            Err(Error::ImplausibleDate { .. })
        ));
        assert!(matches!(
            resolve_expr("2090-01-01"),
            Err(Error::ImplausibleDate { .. })
        ));
    }

    #[test]
    fn update_date_keeps_fallback_day_for_bare_times() {
        let fallback = resolve_expr("2025-03-14 08:00:00").unwrap();
        let updated = update_date(&fallback, "18:00").unwrap();
        assert_eq!(updated.date_naive(), fallback.date_naive());
        assert_eq!(updated.time(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn update_date_accepts_full_expressions() {
        let fallback = resolve_expr("2025-03-14 08:00:00").unwrap();
        let updated = update_date(&fallback, "2025-04-01 09:15:00").unwrap();
        assert_eq!(
            updated.naive_local(),
            NaiveDate::from_ymd_opt(2025, 4, 1)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap()
        );
    }
}
