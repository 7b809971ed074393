//! Timestamp parsing and the two display formats used by the widget.
//!
//! - Bubble time: `"Wed 8:21 PM"` inside the current calendar week
//!   (Sunday to Saturday, local time), `"Aug 21 8:21 PM"` otherwise.
//! - Badge date: `"Jun 20, 2024"`, no relative logic.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{ChatError, Result};

const WEEKDAY_FORMAT: &str = "%a %-I:%M %p";
const MONTH_DAY_FORMAT: &str = "%b %-d %-I:%M %p";
const BADGE_FORMAT: &str = "%b %-d, %Y";

/// Parse a host-supplied timestamp.
///
/// Accepts RFC 3339 (`2023-08-21T14:46:09.437Z`) and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, which is taken as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ChatError::InvalidInput(format!("unparseable timestamp {input:?}: {e}")))
}

/// Bubble time label relative to the current local week.
pub fn format_message_time(ts: &DateTime<Utc>) -> String {
    format_message_time_at(&ts.with_timezone(&Local), &Local::now())
}

/// Bubble time label relative to the week containing `now`, in `now`'s zone.
pub fn format_message_time_at<Tz>(ts: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let tz = now.timezone();
    let local = ts.with_timezone(&tz);
    let (start, end) = week_bounds(now);
    let format = if local >= start && local < end {
        WEEKDAY_FORMAT
    } else {
        MONTH_DAY_FORMAT
    };
    local.format(format).to_string()
}

/// Floating badge label in local time.
pub fn format_badge_date(ts: &DateTime<Utc>) -> String {
    format_badge_date_in(ts, &Local)
}

/// Floating badge label in an explicit zone.
pub fn format_badge_date_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format(BADGE_FORMAT).to_string()
}

/// `[Sunday 00:00, next Sunday 00:00)` around `now`, in `now`'s zone.
fn week_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    let tz = now.timezone();
    let today = now.date_naive();
    let back = u64::from(today.weekday().num_days_from_sunday());
    let sunday = today.checked_sub_days(Days::new(back)).unwrap_or(today);
    let next_sunday = sunday.checked_add_days(Days::new(7)).unwrap_or(sunday);
    (local_midnight(&tz, sunday), local_midnight(&tz, next_sunday))
}

/// Start of `date` in `tz`. Zones that skip midnight start the day at the
/// first representable instant.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    (0..=3)
        .find_map(|hours| {
            tz.from_local_datetime(&(midnight + chrono::Duration::hours(hours)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
