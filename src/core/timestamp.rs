//! Timestamp and call-site rendering for line headers
//!
//! Both the plain channel header and the JSON `time`/`file` fields are built
//! here so the two outputs agree on layout:
//! - time: `YYYY/MM/DD HH:MM:SS[.micros]`, local unless the UTC flag is set
//! - file: `path:line`, cut to the last path element for SHORT_FILE

use super::flags::OutputFlags;
use super::log_entry::CallSite;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Write;

/// Render the date/time part selected by `flags`.
///
/// Returns `None` when no date or time flag is set.
#[must_use]
pub fn format_time(flags: OutputFlags, timestamp: &DateTime<Utc>) -> Option<String> {
    if !flags.wants_time() {
        return None;
    }

    if flags.contains(OutputFlags::UTC) {
        Some(format_in_zone(flags, timestamp))
    } else {
        Some(format_in_zone(flags, &timestamp.with_timezone(&Local)))
    }
}

fn format_in_zone<Tz: TimeZone>(flags: OutputFlags, timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut parts: Vec<String> = Vec::with_capacity(2);
    if flags.contains(OutputFlags::DATE) {
        parts.push(timestamp.format("%Y/%m/%d").to_string());
    }
    if flags.intersects(OutputFlags::TIME | OutputFlags::MICROSECONDS) {
        if flags.contains(OutputFlags::MICROSECONDS) {
            parts.push(timestamp.format("%H:%M:%S%.6f").to_string());
        } else {
            parts.push(timestamp.format("%H:%M:%S").to_string());
        }
    }
    parts.join(" ")
}

/// Render `file:line` as selected by `flags`.
///
/// Returns `None` when neither file flag is set.
#[must_use]
pub fn format_call_site(flags: OutputFlags, call_site: CallSite) -> Option<String> {
    if !flags.wants_call_site() {
        return None;
    }

    let file = if flags.contains(OutputFlags::SHORT_FILE) {
        short_file(call_site.file)
    } else {
        call_site.file
    };

    let mut out = String::with_capacity(file.len() + 6);
    let _ = write!(out, "{}:{}", file, call_site.line);
    Some(out)
}

fn short_file(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_no_time_flags() {
        assert_eq!(format_time(OutputFlags::DISABLED, &fixed_datetime()), None);
        assert_eq!(format_time(OutputFlags::SHORT_FILE, &fixed_datetime()), None);
    }

    #[test]
    fn test_utc_std_format() {
        let flags = OutputFlags::STD | OutputFlags::UTC;
        assert_eq!(
            format_time(flags, &fixed_datetime()).as_deref(),
            Some("2025/01/08 10:30:45")
        );
    }

    #[test]
    fn test_utc_microseconds() {
        let flags = OutputFlags::DATE | OutputFlags::MICROSECONDS | OutputFlags::UTC;
        assert_eq!(
            format_time(flags, &fixed_datetime()).as_deref(),
            Some("2025/01/08 10:30:45.123456")
        );
    }

    #[test]
    fn test_utc_date_only() {
        let flags = OutputFlags::DATE | OutputFlags::UTC;
        assert_eq!(
            format_time(flags, &fixed_datetime()).as_deref(),
            Some("2025/01/08")
        );
    }

    #[test]
    fn test_local_time_has_same_shape() {
        let rendered = format_time(OutputFlags::STD, &fixed_datetime()).unwrap();
        assert_eq!(rendered.len(), "2025/01/08 10:30:45".len());
        assert_eq!(&rendered[4..5], "/");
    }

    #[test]
    fn test_call_site_long_and_short() {
        let site = CallSite {
            file: "src/server/main.rs",
            line: 23,
        };
        assert_eq!(
            format_call_site(OutputFlags::LONG_FILE, site).as_deref(),
            Some("src/server/main.rs:23")
        );
        assert_eq!(
            format_call_site(OutputFlags::SHORT_FILE | OutputFlags::LONG_FILE, site).as_deref(),
            Some("main.rs:23")
        );
        assert_eq!(format_call_site(OutputFlags::STD, site), None);
    }

    #[test]
    fn test_unknown_call_site() {
        assert_eq!(
            format_call_site(OutputFlags::SHORT_FILE, CallSite::UNKNOWN).as_deref(),
            Some("???:0")
        );
    }
}
