// Relative time formatting.
// Constructed once and passed to the UI instead of living in global state.

use chrono::{DateTime, Utc};

/// Formats timestamps relative to a clock ("3 days ago").
#[derive(Debug, Clone, Copy)]
pub struct TimeAgo {
    now: fn() -> DateTime<Utc>,
}

impl Default for TimeAgo {
    fn default() -> Self {
        Self { now: Utc::now }
    }
}

impl TimeAgo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter reading time from `now` instead of the system clock.
    #[cfg(test)]
    pub fn with_clock(now: fn() -> DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn format(&self, dt: &DateTime<Utc>) -> String {
        format_relative(dt, &(self.now)())
    }
}

fn unit(count: i64, name: &str) -> String {
    if count == 1 {
        format!("1 {} ago", name)
    } else {
        format!("{} {}s ago", count, name)
    }
}

/// Format `dt` relative to `now`. Future timestamps read as "just now".
pub fn format_relative(dt: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);
    let days = duration.num_days();

    if days >= 365 {
        unit(days / 365, "year")
    } else if days >= 30 {
        unit(days / 30, "month")
    } else if days >= 7 {
        unit(days / 7, "week")
    } else if days > 0 {
        unit(days, "day")
    } else if duration.num_hours() > 0 {
        unit(duration.num_hours(), "hour")
    } else if duration.num_minutes() > 0 {
        unit(duration.num_minutes(), "minute")
    } else {
        "just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_relative() {
        let now = fixed_now();
        let ago = |d: Duration| format_relative(&(now - d), &now);

        assert_eq!(ago(Duration::seconds(20)), "just now");
        assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::days(1)), "1 day ago");
        assert_eq!(ago(Duration::days(15)), "2 weeks ago");
        assert_eq!(ago(Duration::days(65)), "2 months ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn test_future_is_just_now() {
        let now = fixed_now();
        assert_eq!(format_relative(&(now + Duration::hours(2)), &now), "just now");
    }

    #[test]
    fn test_injected_clock() {
        let time_ago = TimeAgo::with_clock(fixed_now);
        let dt = fixed_now() - Duration::days(2);
        assert_eq!(time_ago.format(&dt), "2 days ago");
    }
}
