//! Datestamp validation and rendering
//!
//! The metadata store keeps timezone-naive datestamps that are treated as
//! GMT. Incoming `from`/`until` arguments may be date-only or date-time,
//! with an optional trailing zone marker that is stripped before parsing.
//! Outgoing datestamps are always rendered as `YYYY-MM-DDTHH:MM:SSZ`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Output format for all datestamps
pub const DATESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a datestamp as the store understands it.
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DDTHH:MM:SS`, with `T` or a space as
/// the separator and an optional trailing `Z`. A date-only value maps to
/// midnight.
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.strip_suffix('Z').unwrap_or(value);
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Whether `value` is an acceptable `from`/`until` argument
pub fn is_valid(value: &str) -> bool {
    parse(value).is_some()
}

/// Render a stored datestamp in the canonical output form.
///
/// An unparseable stored value renders as the Unix epoch; the store is
/// trusted but a malformed row should not take the whole response down.
pub fn format(stored: &str) -> String {
    let parsed = parse(stored).unwrap_or_else(|| {
        tracing::warn!(datestamp = stored, "unparseable stored datestamp, rendering epoch");
        DateTime::UNIX_EPOCH.naive_utc()
    });
    parsed.format(DATESTAMP_FORMAT).to_string()
}

/// The current time in canonical output form
pub fn now() -> String {
    Utc::now().format(DATESTAMP_FORMAT).to_string()
}

/// `now + validity_secs` in canonical output form
pub fn expiration(validity_secs: u64) -> String {
    (Utc::now() + chrono::Duration::seconds(validity_secs as i64))
        .format(DATESTAMP_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_date_only() {
        assert!(is_valid("2020-01-02"));
    }

    #[test]
    fn test_accepts_date_time_with_zone() {
        assert!(is_valid("2020-01-02T03:04:05Z"));
        assert!(is_valid("2020-01-02T03:04:05"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_valid("not-a-date"));
        assert!(!is_valid(""));
        assert!(!is_valid("2020-13-40"));
    }

    #[test]
    fn test_date_only_is_midnight() {
        let dt = parse("2020-01-02").unwrap();
        assert_eq!(dt.format(DATESTAMP_FORMAT).to_string(), "2020-01-02T00:00:00Z");
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format("2020-01-02"), "2020-01-02T00:00:00Z");
        assert_eq!(format("2020-01-02T03:04:05Z"), "2020-01-02T03:04:05Z");
        assert_eq!(format("2020-01-02 03:04:05"), "2020-01-02T03:04:05Z");
    }

    #[test]
    fn test_format_unparseable_renders_epoch() {
        assert_eq!(format("garbage"), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_now_shape() {
        let now = now();
        assert_eq!(now.len(), 20);
        assert!(now.ends_with('Z'));
        assert!(is_valid(&now));
    }
}
