//! Current-time generator.

use crate::error::GenerationError;
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::{Display, Write};

/// Time zone a timestamp is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The host's local zone.
    Local,
    /// Coordinated Universal Time.
    Utc,
    /// A named IANA zone such as `Asia/Tokyo`.
    Named(Tz),
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// Parse `UTC`, `Local`, an IANA zone name, or an offset like `+09:00`.
    pub fn parse(s: &str) -> Option<Zone> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Some(Zone::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Some(Zone::Utc);
        }
        if let Ok(tz) = s.parse::<Tz>() {
            return Some(Zone::Named(tz));
        }
        s.parse::<FixedOffset>().ok().map(Zone::Fixed)
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Zone::Named(tz)
    }
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Zone::Fixed(offset)
    }
}

/// Append `now` rendered with the strftime `layout` in `zone`.
pub fn append_time(
    buf: &mut String,
    now: DateTime<Utc>,
    layout: &str,
    zone: Zone,
) -> Result<(), GenerationError> {
    match zone {
        Zone::Local => write_in(buf, &now, &Local, layout),
        Zone::Utc => write_in(buf, &now, &Utc, layout),
        Zone::Named(tz) => write_in(buf, &now, &tz, layout),
        Zone::Fixed(offset) => write_in(buf, &now, &offset, layout),
    }
}

/// Append the current wall-clock time, read at the moment of the call.
pub fn append_now(buf: &mut String, layout: &str, zone: Zone) -> Result<(), GenerationError> {
    append_time(buf, Utc::now(), layout, zone)
}

fn write_in<Z>(
    buf: &mut String,
    now: &DateTime<Utc>,
    zone: &Z,
    layout: &str,
) -> Result<(), GenerationError>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    // chrono reports unknown specifiers as a fmt::Error while rendering.
    write!(buf, "{}", now.with_timezone(zone).format(layout))
        .map_err(|_| GenerationError::Format(format!("invalid timestamp layout {layout:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T23:30:05Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_utc_layout() {
        let mut buf = String::new();
        append_time(&mut buf, fixed_instant(), "%Y-%m-%d %H:%M:%S", Zone::Utc).unwrap();
        assert_eq!(buf, "2024-03-01 23:30:05");
    }

    #[test]
    fn test_named_zone_conversion() {
        let mut buf = String::new();
        let zone = Zone::parse("Asia/Tokyo").unwrap();
        append_time(&mut buf, fixed_instant(), "%Y%m%d%H", zone).unwrap();
        assert_eq!(buf, "2024030208");
    }

    #[test]
    fn test_fixed_offset_conversion() {
        let mut buf = String::new();
        let zone = Zone::parse("-05:00").unwrap();
        append_time(&mut buf, fixed_instant(), "%H:%M %z", zone).unwrap();
        assert_eq!(buf, "18:30 -0500");
    }

    #[test]
    fn test_parse_zone_names() {
        assert_eq!(Zone::parse("UTC"), Some(Zone::Utc));
        assert_eq!(Zone::parse("local"), Some(Zone::Local));
        assert_eq!(Zone::parse("Europe/Paris"), Some(Zone::Named(Tz::Europe__Paris)));
        assert_eq!(Zone::parse("Mars/Olympus"), None);
    }

    #[test]
    fn test_invalid_layout_is_format_error() {
        let mut buf = String::new();
        let result = append_time(&mut buf, fixed_instant(), "%Y-%Q", Zone::Utc);
        assert!(matches!(result, Err(GenerationError::Format(_))));
    }

    #[test]
    fn test_now_appends_current_year() {
        let mut buf = String::new();
        append_now(&mut buf, "%Y", Zone::Utc).unwrap();
        let year: i32 = buf.parse().unwrap();
        assert!(year >= 2024);
    }
}
