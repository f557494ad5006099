use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};
use regex::{Captures, Regex};

const DATE_PATTERN: &str = r"
(?: # date is in ISO format (yyyy-mm-dd)
  (?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})
) | (?: # date is a name referring to a day relative to the local date
  (?P<relative>yesterday | today | monday | tuesday | wednesday | thursday | friday | saturday | sunday)
)";

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?xi) ^ (?: {DATE_PATTERN} ) $"))
        .expect("Could not parse Regex")
});

static DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?xi)
^ # anchor to start of string

(?: # date part (optional, defaults to current day)
  (?: {DATE_PATTERN} )
  (?:\s*T?\s*) # can be either a T or nothing, with arbitrary whitespace allowed everywhere
)?
# time part
(?P<hour>\d{{2}}):(?P<minute>\d{{2}})(?::(?P<second>\d{{2}}))?

$ # anchor to end of string
"
    ))
    .expect("Could not parse Regex")
});

/// Parses a calendar date such as a hire date: `2020-01-01`, `today`, `yesterday`, or the
/// name of a weekday (meaning the most recent such day before `today`).
pub fn parse_date(date: &str, today: NaiveDate) -> Option<NaiveDate> {
    let captures = DATE_REGEX.captures(date.trim())?;
    date_from_captures(&captures, today)
}

/// Parses a date and time in the given timezone, e.g. `2020-02-01 09:30` or `monday 14:00:00`.
/// The date part defaults to `today`.
pub fn parse_datetime<Tz>(datetime: &str, timezone: &Tz, today: NaiveDate) -> Option<DateTime<Utc>>
where
    Tz: TimeZone,
{
    let captures = DATETIME_REGEX.captures(datetime.trim())?;
    let date = date_from_captures(&captures, today)?;

    let local = timezone.with_ymd_and_hms(
        date.year(),
        date.month(),
        date.day(),
        number(&captures, "hour")?,
        number(&captures, "minute")?,
        number(&captures, "second").unwrap_or(0),
    );

    Some(local.latest()?.with_timezone(&Utc))
}

fn date_from_captures(captures: &Captures, today: NaiveDate) -> Option<NaiveDate> {
    if captures.name("year").is_some() {
        return NaiveDate::from_ymd_opt(
            number(captures, "year")?,
            number(captures, "month")?,
            number(captures, "day")?,
        );
    }

    parse_relative_date(captures.name("relative").map(|m| m.as_str()), today)
}

fn parse_relative_date(relation: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
    match relation {
        None => Some(today),
        Some(day) if day.eq_ignore_ascii_case("today") => Some(today),
        Some(day) if day.eq_ignore_ascii_case("yesterday") => today.pred_opt(),
        Some(day) => {
            let weekday = day.parse().ok()?;
            find_last_day(today, weekday)
        }
    }
}

fn find_last_day(today: NaiveDate, day_of_week: Weekday) -> Option<NaiveDate> {
    let current_day = today.weekday();
    match current_day.days_since(day_of_week) {
        // don't allow user to specify "monday" on a monday,
        // as it is ambiguous if they mean today or last monday
        0 => None,
        n => Some(today - (Days::new(n as u64))),
    }
}

fn number<T: std::str::FromStr>(captures: &Captures, name: &str) -> Option<T> {
    captures.name(name)?.as_str().parse().ok()
}
