//! Human-friendly timestamps.
use chrono::DateTime;
use chrono::Utc;

pub type Timestamp = DateTime<Utc>;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Full timestamp for tooltips, e.g. `Jan 2, 2006, 3:04 PM UTC`.
pub fn absolute_time(t: DateTime<Utc>) -> String {
    t.format("%b %-d, %Y, %-I:%M %p %Z").to_string()
}

/// `3 hours ago`, `1 week from now`, `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then).num_seconds();
    let suffix = if delta < 0 { "from now" } else { "ago" };
    let secs = delta.abs();

    let (n, unit) = match secs {
        0 => return "now".to_string(),
        s if s < MINUTE => (s, "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} {suffix}")
}
