//! Date helper functions

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Parse a date string in the formats content authors actually use
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).single();
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Local.from_local_datetime(&dt).single();
    }

    // Display-style dates ("Feb 12, 2026") from legacy content
    if let Ok(d) = NaiveDate::parse_from_str(s, "%b %d, %Y") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Local.from_local_datetime(&dt).single();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

/// Format a date the way the site displays it ("Feb 12, 2026")
pub fn display_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// Format a date in full ("February 12, 2026")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format a date for sitemap lastmod entries
pub fn lastmod_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_date_string("2026-02-12").unwrap();
        assert_eq!(lastmod_date(&date), "2026-02-12");
    }

    #[test]
    fn test_parse_display_date() {
        let date = parse_date_string("Feb 12, 2026").unwrap();
        assert_eq!(lastmod_date(&date), "2026-02-12");
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date_string("not a date").is_none());
    }

    #[test]
    fn test_display_date() {
        let date = Local.with_ymd_and_hms(2026, 2, 12, 0, 0, 0).unwrap();
        assert_eq!(display_date(&date), "Feb 12, 2026");
        assert_eq!(full_date(&date), "February 12, 2026");
    }
}
