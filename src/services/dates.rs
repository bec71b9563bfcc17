//! Date formatting helpers for dashboard projections.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Short human-readable date, e.g. "Mar 14, 2026".
pub fn short_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %d, %Y").to_string()
}

/// RFC 3339 timestamp rendered in the user's IANA timezone.
///
/// Unknown timezone names fall back to UTC rather than failing the request.
pub fn localized(ts: DateTime<Utc>, timezone: &str) -> String {
    let tz: Tz = timezone.parse().unwrap_or(chrono_tz::UTC);
    ts.with_timezone(&tz).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_date_format() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        assert_eq!(short_date(ts), "Mar 14, 2026");
    }

    #[test]
    fn short_date_pads_day() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(short_date(ts), "Jan 02, 2026");
    }

    #[test]
    fn localized_converts_to_timezone() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(localized(ts, "Europe/Paris"), "2026-01-15T13:00:00+01:00");
    }

    #[test]
    fn localized_unknown_timezone_falls_back_to_utc() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(localized(ts, "Not/AZone"), "2026-01-15T12:00:00+00:00");
    }
}
