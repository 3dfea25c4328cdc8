use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, now.timestamp_millis(), &random[..9])
}

/// Parses a due date the way the backend and the upload form send them.
/// Bare dates are taken as midnight UTC.
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }

    let datetime_formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
    for fmt in datetime_formats.iter() {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(datetime.and_utc());
        }
    }

    let date_formats = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in date_formats.iter() {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        }
    }
    None
}

/// Whole days until `due_date`, rounded up. `None` when the date can't be read.
pub fn days_until_due(due_date: &str, now: DateTime<Utc>) -> Option<i64> {
    let due = parse_due_date(due_date)?;
    let ms = (due - now).num_milliseconds();
    let whole = ms.div_euclid(DAY_MS);
    Some(if ms.rem_euclid(DAY_MS) > 0 { whole + 1 } else { whole })
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// en-IN number grouping (`1,56,000`), up to three fraction digits.
pub fn format_indian_number(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, group_indian(int_part))
    } else {
        format!("{}{}.{}", sign, group_indian(int_part), frac)
    }
}

/// Rupee amount rounded to whole units, e.g. `₹1,56,000`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(&format!("{:.0}", rounded.abs())))
}
