//! Pure data-shaping helpers over shipment records.
//!
//! These functions never fail: malformed data is detected and reported through
//! their return values so callers can annotate it instead of rejecting it.

use chrono::{DateTime, Utc};

use crate::models::{get_timestamp, is_valid_date, parse_timestamp, Milestone, Shipment};

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

pub const NO_TIMESTAMP: &str = "No timestamp";
pub const INVALID_TIMESTAMP: &str = "Invalid timestamp";

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

/// Whether a milestone lacks a usable timestamp.
pub fn has_invalid_timestamp(milestone: &Milestone) -> bool {
    !is_valid_date(milestone.timestamp())
}

/// A shipment is inconsistent when a core field is missing, it has no
/// milestones, or any milestone carries a missing or invalid timestamp.
pub fn has_inconsistent_data(shipment: &Shipment) -> bool {
    if is_blank(&shipment.id)
        || is_blank(&shipment.customer)
        || is_blank(&shipment.origin)
        || is_blank(&shipment.destination)
    {
        return true;
    }
    if shipment.milestones.is_empty() {
        return true;
    }
    shipment.milestones.iter().any(has_invalid_timestamp)
}

/// Milestone with the greatest valid timestamp. Invalid timestamps are
/// ignored entirely; on ties the first one encountered wins.
pub fn get_latest_milestone(shipment: &Shipment) -> Option<&Milestone> {
    let mut latest: Option<(i64, &Milestone)> = None;
    for milestone in &shipment.milestones {
        let Some(time) = get_timestamp(milestone.timestamp()) else {
            continue;
        };
        match latest {
            Some((best, _)) if time <= best => {}
            _ => latest = Some((time, milestone)),
        }
    }
    latest.map(|(_, milestone)| milestone)
}

/// Sort key for "most recent" ordering: the greatest valid timestamp in
/// epoch milliseconds, `0` when the shipment has none.
pub fn get_latest_milestone_time(shipment: &Shipment) -> i64 {
    shipment
        .milestones
        .iter()
        .filter_map(|m| get_timestamp(m.timestamp()))
        .max()
        .unwrap_or(0)
}

/// Milestones in ascending time order. Missing or invalid timestamps go last
/// and keep their relative order.
pub fn sort_milestones_chronologically(milestones: &[Milestone]) -> Vec<&Milestone> {
    let mut sorted: Vec<&Milestone> = milestones.iter().collect();
    // `None` must order after every `Some`, so compare on (is_missing, time).
    sorted.sort_by_key(|m| match get_timestamp(m.timestamp()) {
        Some(time) => (false, time),
        None => (true, 0),
    });
    sorted
}

/// Relative description of a timestamp measured against the wall clock.
pub fn format_date(value: Option<&str>) -> String {
    format_date_at(value, Utc::now())
}

/// Relative description of a timestamp measured against `now`.
///
/// Day, hour and minute counts are floored from the elapsed milliseconds, so
/// 23 hours across midnight is still the same day.
pub fn format_date_at(value: Option<&str>, now: DateTime<Utc>) -> String {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return NO_TIMESTAMP.to_string(),
    };
    let date = match parse_timestamp(value) {
        Some(date) => date,
        None => return INVALID_TIMESTAMP.to_string(),
    };

    let diff_ms = (now - date).num_milliseconds();
    let diff_days = diff_ms.div_euclid(MS_PER_DAY);

    match diff_days {
        0 => {
            let diff_hours = diff_ms.div_euclid(MS_PER_HOUR);
            if diff_hours == 0 {
                let diff_mins = diff_ms.div_euclid(MS_PER_MINUTE);
                if diff_mins <= 1 {
                    "Just now".to_string()
                } else {
                    format!("{} minutes ago", diff_mins)
                }
            } else if diff_hours == 1 {
                "1 hour ago".to_string()
            } else {
                format!("{} hours ago", diff_hours)
            }
        }
        1 => "Yesterday".to_string(),
        days if days < 7 => format!("{} days ago", days),
        _ => date.format("%-m/%-d/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn ago(duration: Duration) -> String {
        (now() - duration).to_rfc3339()
    }

    fn complete_shipment() -> Shipment {
        Shipment::new("SHP-1", "Acme", "Rotterdam", "Oslo").with_milestones(vec![
            Milestone::new("Created", Some("2024-01-01T08:00:00Z")),
            Milestone::new("Picked up", Some("2024-01-02T08:00:00Z")),
        ])
    }

    #[test]
    fn test_complete_shipment_is_consistent() {
        assert!(!has_inconsistent_data(&complete_shipment()));
    }

    #[test]
    fn test_missing_destination_is_inconsistent() {
        let mut shipment = complete_shipment();
        shipment.destination = None;
        assert!(has_inconsistent_data(&shipment));
    }

    #[test]
    fn test_empty_core_field_is_inconsistent() {
        let mut shipment = complete_shipment();
        shipment.customer = Some(String::new());
        assert!(has_inconsistent_data(&shipment));
    }

    #[test]
    fn test_empty_milestones_is_inconsistent() {
        let shipment = complete_shipment().with_milestones(vec![]);
        assert!(has_inconsistent_data(&shipment));
    }

    #[test]
    fn test_null_timestamp_milestone() {
        let shipment =
            complete_shipment().with_milestones(vec![Milestone::new("Created", None)]);
        assert!(has_inconsistent_data(&shipment));
        assert!(get_latest_milestone(&shipment).is_none());
        assert_eq!(get_latest_milestone_time(&shipment), 0);
    }

    #[test]
    fn test_latest_milestone_ignores_invalid() {
        let shipment = complete_shipment().with_milestones(vec![
            Milestone::new("Created", Some("2024-01-01T08:00:00Z")),
            Milestone::new("Lost scan", Some("not-a-date")),
            Milestone::new("Delivered", Some("2024-01-05T08:00:00Z")),
            Milestone::new("Pending", None),
        ]);
        let latest = get_latest_milestone(&shipment).unwrap();
        assert_eq!(latest.status, "Delivered");
        assert_eq!(
            get_latest_milestone_time(&shipment),
            get_timestamp(Some("2024-01-05T08:00:00Z")).unwrap()
        );
    }

    #[test]
    fn test_latest_milestone_tie_keeps_first() {
        let shipment = complete_shipment().with_milestones(vec![
            Milestone::new("First", Some("2024-01-05T08:00:00Z")),
            Milestone::new("Second", Some("2024-01-05T08:00:00Z")),
        ]);
        assert_eq!(get_latest_milestone(&shipment).unwrap().status, "First");
    }

    #[test]
    fn test_latest_milestone_before_epoch() {
        let shipment = complete_shipment().with_milestones(vec![
            Milestone::new("Old", Some("1960-01-01")),
            Milestone::new("Older", Some("1950-01-01")),
        ]);
        assert_eq!(get_latest_milestone(&shipment).unwrap().status, "Old");
    }

    #[test]
    fn test_sort_chronologically_is_stable() {
        let milestones = vec![
            Milestone::new("a", None),
            Milestone::new("b", Some("2024-01-02")),
            Milestone::new("c", Some("2024-01-01")),
            Milestone::new("d", Some("garbage")),
        ];
        let sorted: Vec<&str> = sort_milestones_chronologically(&milestones)
            .iter()
            .map(|m| m.status.as_str())
            .collect();
        assert_eq!(sorted, vec!["c", "b", "a", "d"]);
        // Input untouched.
        assert_eq!(milestones[0].status, "a");
    }

    #[test]
    fn test_format_missing_and_invalid() {
        assert_eq!(format_date_at(None, now()), "No timestamp");
        assert_eq!(format_date_at(Some(""), now()), "No timestamp");
        assert_eq!(format_date_at(Some("soon"), now()), "Invalid timestamp");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_date_at(Some(&ago(Duration::seconds(30))), now()), "Just now");
        // floor(90s / 60s) = 1, which is still within the "just now" window.
        assert_eq!(format_date_at(Some(&ago(Duration::seconds(90))), now()), "Just now");
        assert_eq!(
            format_date_at(Some(&ago(Duration::seconds(150))), now()),
            "2 minutes ago"
        );
        assert_eq!(
            format_date_at(Some(&ago(Duration::minutes(59))), now()),
            "59 minutes ago"
        );
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_date_at(Some(&ago(Duration::minutes(61))), now()), "1 hour ago");
        assert_eq!(format_date_at(Some(&ago(Duration::hours(3))), now()), "3 hours ago");
        assert_eq!(format_date_at(Some(&ago(Duration::hours(23))), now()), "23 hours ago");
    }

    #[test]
    fn test_format_days() {
        assert_eq!(format_date_at(Some(&ago(Duration::hours(25))), now()), "Yesterday");
        assert_eq!(format_date_at(Some(&ago(Duration::hours(47))), now()), "Yesterday");
        assert_eq!(format_date_at(Some(&ago(Duration::days(2))), now()), "2 days ago");
        assert_eq!(format_date_at(Some(&ago(Duration::days(6))), now()), "6 days ago");
    }

    #[test]
    fn test_format_absolute_after_a_week() {
        assert_eq!(format_date_at(Some(&ago(Duration::days(8))), now()), "3/7/2024");
        assert_eq!(format_date_at(Some("2023-12-25T10:00:00Z"), now()), "12/25/2023");
    }

    #[test]
    fn test_format_future_timestamp_floors_negative() {
        // One hour ahead floors to -1 days.
        assert_eq!(
            format_date_at(Some(&ago(Duration::hours(-1))), now()),
            "-1 days ago"
        );
    }

    #[test]
    fn test_minute_precision_zulu_milestone_is_consistent() {
        let shipment = Shipment::new("SHP-9", "Acme", "A", "B")
            .with_milestones(vec![Milestone::new("Created", Some("2024-05-01T08:00Z"))]);
        assert!(!has_inconsistent_data(&shipment));
        assert_eq!(
            get_latest_milestone(&shipment).map(|m| m.status.as_str()),
            Some("Created")
        );
        assert!(get_latest_milestone_time(&shipment) > 0);
    }
}
