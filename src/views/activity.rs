use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::models::Activity;
use crate::utils::format_currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(flatten)]
    pub activity: Activity,
    pub label: String,
    pub relative_time: String,
    pub time_of_day: String,
    pub amount_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityGroup {
    pub label: String,
    pub items: Vec<ActivityItem>,
}

pub fn relative_timestamp<Tz>(timestamp: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let diff = now.clone().with_timezone(&Utc) - timestamp;
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} min ago", minutes);
    }
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" });
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < 7 {
        return format!("{} days ago", days);
    }
    timestamp.with_timezone(&now.timezone()).format("%-d %b").to_string()
}

/// Calendar bucket in the viewer's time zone. The week starts on Sunday.
pub fn date_group<Tz>(timestamp: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(&now.timezone());
    let day = local.date_naive();
    let today = now.date_naive();

    if day == today {
        return "Today".to_string();
    }
    if Some(day) == today.pred_opt() {
        return "Yesterday".to_string();
    }
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    if day >= week_start {
        return "Earlier This Week".to_string();
    }
    local.format("%-d %B %Y").to_string()
}

/// Newest first, bucketed by day; buckets keep the order they first appear in.
pub fn activity_feed<Tz>(activities: &[Activity], now: &DateTime<Tz>) -> Vec<ActivityGroup>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut sorted = activities.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut groups: Vec<ActivityGroup> = Vec::new();
    for activity in sorted {
        let label = date_group(activity.timestamp, now);
        let item = ActivityItem {
            label: activity.kind.label().to_string(),
            relative_time: relative_timestamp(activity.timestamp, now),
            time_of_day: activity
                .timestamp
                .with_timezone(&now.timezone())
                .format("%I:%M %P")
                .to_string(),
            amount_display: activity
                .metadata
                .as_ref()
                .and_then(|m| m.amount)
                .map(format_currency),
            activity,
        };

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.items.push(item),
            None => groups.push(ActivityGroup {
                label,
                items: vec![item],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed::initial_activities;

    // A Thursday.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 15, 15, 0, 0).unwrap()
    }

    #[test]
    fn relative_buckets() {
        let now = now();
        assert_eq!(relative_timestamp(now - Duration::seconds(20), &now), "Just now");
        assert_eq!(relative_timestamp(now - Duration::minutes(23), &now), "23 min ago");
        assert_eq!(relative_timestamp(now - Duration::minutes(60), &now), "1 hour ago");
        assert_eq!(relative_timestamp(now - Duration::hours(5), &now), "5 hours ago");
        assert_eq!(relative_timestamp(now - Duration::hours(26), &now), "Yesterday");
        assert_eq!(relative_timestamp(now - Duration::hours(72), &now), "3 days ago");
        assert_eq!(relative_timestamp(now - Duration::days(9), &now), "6 Feb");
    }

    #[test]
    fn date_groups() {
        let now = now();
        assert_eq!(date_group(now - Duration::hours(2), &now), "Today");
        assert_eq!(date_group(now - Duration::hours(20), &now), "Yesterday");
        assert_eq!(date_group(now - Duration::days(3), &now), "Earlier This Week");
        assert_eq!(date_group(now - Duration::days(4), &now), "Earlier This Week");
        assert_eq!(date_group(now - Duration::days(5), &now), "10 February 2024");
    }

    #[test]
    fn groups_follow_viewer_time_zone() {
        let ist = chrono::FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 20, 0, 0).unwrap().with_timezone(&ist);
        let just_before_midnight_utc = Utc.with_ymd_and_hms(2024, 2, 15, 19, 0, 0).unwrap();
        assert_eq!(date_group(just_before_midnight_utc, &now), "Today");

        let earlier = Utc.with_ymd_and_hms(2024, 2, 15, 18, 0, 0).unwrap();
        assert_eq!(date_group(earlier, &now), "Yesterday");
    }

    #[test]
    fn feed_sorts_and_groups_seed_log() {
        let now = now();
        let mut activities = initial_activities(now);
        activities.reverse();

        let feed = activity_feed(&activities, &now);
        let labels: Vec<&str> = feed.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Yesterday", "Earlier This Week"]);

        let today = &feed[0];
        assert_eq!(today.items.len(), 6);
        assert_eq!(today.items[0].activity.id, "act-001");
        assert_eq!(today.items[0].label, "Payment Recorded");
        assert_eq!(today.items[0].relative_time, "23 min ago");
        assert_eq!(today.items[0].time_of_day, "02:37 pm");
        assert_eq!(today.items[0].amount_display.as_deref(), Some("₹32,500"));

        assert_eq!(feed[1].items.len(), 3);
        assert_eq!(feed[2].items[0].activity.id, "act-010");
    }
}
