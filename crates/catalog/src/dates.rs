use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date '{0}'")]
pub struct DateParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// JavaScript `Date.prototype.toString()`, minus the trailing zone name.
const JS_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Parses a date filter value into the instant it bounds.
///
/// Calendar days (`2024-05-23`, or a date picker's local midnight) cover the
/// whole day: a start bound opens at the first instant of the day and an end
/// bound closes at the last one. Full timestamps are taken as-is.
pub fn parse_bound(raw: &str, bound: Bound) -> Result<DateTime<Utc>, DateParseError> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(day_bound(&Utc, day, bound));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    let without_zone_name = value.split(" (").next().unwrap_or(value);
    if let Ok(parsed) = DateTime::parse_from_str(without_zone_name, JS_DATE_FORMAT) {
        return Ok(local_day_bound(parsed, bound));
    }

    Err(DateParseError(value.to_string()))
}

fn local_day_bound(parsed: DateTime<FixedOffset>, bound: Bound) -> DateTime<Utc> {
    if parsed.time() != NaiveTime::MIN {
        return parsed.with_timezone(&Utc);
    }
    day_bound(parsed.offset(), parsed.date_naive(), bound)
}

fn day_bound<Tz: TimeZone>(tz: &Tz, day: NaiveDate, bound: Bound) -> DateTime<Utc> {
    let start = tz
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .single()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)));
    match bound {
        Bound::Start => start,
        Bound::End => start + Duration::days(1) - Duration::nanoseconds(1),
    }
}

#[cfg(test)]
#[path = "tests/dates_tests.rs"]
mod tests;
