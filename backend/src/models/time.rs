use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive date-time layouts accepted in addition to RFC 3339.
/// Values without an offset are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Layouts carrying a numeric offset: `+02:00`, `+0200` or `+02`, with or
/// without seconds.
const ZONED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Parse a milestone timestamp into a point in time.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`, `2024-01-01T08:30:00+02:00`),
/// RFC 2822, ISO date-times down to minute precision with a `Z`, a numeric
/// offset or no zone at all, and the date forms `YYYY-MM-DD`, `YYYY-MM` and
/// `YYYY` (midnight UTC on the first day of the period).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ZONED_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = trimmed
        .strip_suffix(['Z', 'z'])
        .unwrap_or(trimmed);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    parse_date_only(trimmed)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or a four-digit `YYYY`.
fn parse_date_only(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_ONLY_FORMAT) {
        return Some(date);
    }
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    if value.bytes().filter(|b| *b == b'-').count() == 1 {
        return NaiveDate::parse_from_str(&format!("{}-01", value), DATE_ONLY_FORMAT).ok();
    }
    None
}

/// Whether a timestamp is present and names a real point in time.
pub fn is_valid_date(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) if v.is_empty() => false,
        Some(v) => parse_timestamp(v).is_some(),
    }
}

/// Epoch milliseconds of a valid timestamp, `None` for missing or invalid input.
pub fn get_timestamp(value: Option<&str>) -> Option<i64> {
    if !is_valid_date(value) {
        return None;
    }
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_empty_are_invalid() {
        assert!(!is_valid_date(None));
        assert!(!is_valid_date(Some("")));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(!is_valid_date(Some("not-a-date")));
        assert!(!is_valid_date(Some("2024-13-45T99:00:00Z")));
        assert!(!is_valid_date(Some("   ")));
    }

    #[test]
    fn test_rfc3339_is_valid() {
        assert!(is_valid_date(Some("2024-01-01T00:00:00Z")));
        assert!(is_valid_date(Some("2024-01-01T08:30:00.250+02:00")));
    }

    #[test]
    fn test_naive_and_date_only_forms() {
        assert!(is_valid_date(Some("2024-01-02")));
        assert!(is_valid_date(Some("2024-01-02T10:15:00")));
        assert!(is_valid_date(Some("2024-01-02 10:15")));
    }

    #[test]
    fn test_minute_precision_with_zone() {
        assert_eq!(
            get_timestamp(Some("2024-05-01T08:00Z")),
            get_timestamp(Some("2024-05-01T08:00:00Z"))
        );
        assert_eq!(
            get_timestamp(Some("2024-05-01T08:00+02:00")),
            get_timestamp(Some("2024-05-01T06:00:00Z"))
        );
    }

    #[test]
    fn test_offset_without_colon() {
        assert_eq!(
            get_timestamp(Some("2024-05-01T08:00:00.000+0000")),
            get_timestamp(Some("2024-05-01T08:00:00Z"))
        );
        assert_eq!(
            get_timestamp(Some("2024-05-01T10:30+0200")),
            get_timestamp(Some("2024-05-01T08:30:00Z"))
        );
    }

    #[test]
    fn test_year_month_and_year_forms() {
        assert_eq!(get_timestamp(Some("2024-05")), get_timestamp(Some("2024-05-01")));
        assert_eq!(get_timestamp(Some("2024")), get_timestamp(Some("2024-01-01")));
        assert!(!is_valid_date(Some("2024-13")));
        assert!(!is_valid_date(Some("20245")));
    }

    #[test]
    fn test_get_timestamp_epoch_millis() {
        assert_eq!(get_timestamp(Some("1970-01-01T00:00:01Z")), Some(1000));
        assert_eq!(get_timestamp(Some("2024-01-01")), Some(1_704_067_200_000));
    }

    #[test]
    fn test_get_timestamp_offsets_normalize_to_utc() {
        assert_eq!(
            get_timestamp(Some("2024-01-01T02:00:00+02:00")),
            get_timestamp(Some("2024-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_get_timestamp_invalid_is_none() {
        assert_eq!(get_timestamp(None), None);
        assert_eq!(get_timestamp(Some("")), None);
        assert_eq!(get_timestamp(Some("yesterday-ish")), None);
    }
}
