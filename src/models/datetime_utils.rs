use chrono::{DateTime, Datelike, Utc};

pub const SECONDS_PER_DAY: i64 = 86_400;

pub fn to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
}

/// UTC calendar day number since the epoch.
pub fn day_index(timestamp: i64) -> i64 {
    timestamp.div_euclid(SECONDS_PER_DAY)
}

pub fn year_of(timestamp: i64) -> String {
    to_datetime(timestamp)
        .map(|dt| dt.year().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn format_date(timestamp: i64) -> String {
    to_datetime(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn current_year() -> String {
    Utc::now().year().to_string()
}
