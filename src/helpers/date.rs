//! Date helper functions

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// Parse a post date string in the formats post collections commonly use
///
/// Dates without an offset are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().fixed_offset());
        }
    }

    None
}

/// Format a date using a Moment.js-compatible format string
///
/// When `tz` is given the date is shown in that zone, otherwise in the
/// offset it was written with.
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMM D, YYYY", None) // -> "Jun 1, 2024"
/// ```
pub fn format_date(date: &DateTime<FixedOffset>, format: &str, tz: Option<Tz>) -> String {
    let chrono_format = moment_to_chrono_format(format);
    match tz {
        Some(tz) => date.with_timezone(&tz).format(&chrono_format).to_string(),
        None => date.format(&chrono_format).to_string(),
    }
}

/// Format a raw date string for display, falling back to the raw string
pub fn display_date(raw: &str, format: &str, tz: Option<Tz>) -> String {
    match parse_date(raw) {
        Some(date) => format_date(&date, format, tz),
        None => raw.to_string(),
    }
}

/// Convert a Moment.js format to a chrono format
///
/// Runs of the same letter form one token; anything unrecognised is copied
/// literally.
fn moment_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let token = match (c, run) {
            ('Y', 4) => Some("%Y"),
            ('Y', 2) => Some("%y"),
            ('M', 4) => Some("%B"),
            ('M', 3) => Some("%b"),
            ('M', 2) => Some("%m"),
            ('M', 1) => Some("%-m"),
            ('D', 2) => Some("%d"),
            ('D', 1) => Some("%-d"),
            ('d', 4) => Some("%A"),
            ('d', 3) => Some("%a"),
            ('H', 2) => Some("%H"),
            ('H', 1) => Some("%-H"),
            ('h', 2) => Some("%I"),
            ('h', 1) => Some("%-I"),
            ('m', 2) => Some("%M"),
            ('s', 2) => Some("%S"),
            ('A', 1) => Some("%p"),
            _ => None,
        };

        match token {
            Some(t) => result.push_str(t),
            None => {
                for _ in 0..run {
                    if c == '%' {
                        result.push_str("%%");
                    } else {
                        result.push(c);
                    }
                }
            }
        }

        i += run;
    }

    result
}
