//! Read-only shapes for each dashboard page, built from the store on demand.

use chrono::{DateTime, TimeZone, Utc};

pub mod activity;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod tasks;

/// Compact age used on task cards: "Just now", "3h ago", "Yesterday", "4d ago".
pub fn short_age<Tz: TimeZone>(created_at: DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let diff = now.clone().with_timezone(&Utc) - created_at;
    let hours = diff.num_hours();
    let days = diff.num_days();

    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    format!("{}d ago", days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn short_age_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 10, 0, 0).unwrap();
        assert_eq!(short_age(now - Duration::minutes(59), &now), "Just now");
        assert_eq!(short_age(now + Duration::minutes(5), &now), "Just now");
        assert_eq!(short_age(now - Duration::hours(3), &now), "3h ago");
        assert_eq!(short_age(now - Duration::hours(30), &now), "Yesterday");
        assert_eq!(short_age(now - Duration::hours(50), &now), "2d ago");
    }
}
