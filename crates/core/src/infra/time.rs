use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Renders an instant in the configured zone for log lines.
pub fn format_round_time(t: DateTime<Utc>, zone: &Tz) -> String {
    t.with_timezone(zone)
        .format("%Y-%m-%d %H:%M:%S%.3f %Z")
        .to_string()
}

/// RFC 3339 in UTC with millisecond precision and a `Z` suffix.
pub fn iso_utc(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
