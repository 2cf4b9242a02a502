//! Display helpers for countdown and reminder text

use chrono::Duration;

/// Notification title shown once a timer is done
pub fn ready_title(name: &str) -> String {
    format!("{} is ready", name)
}

/// Remaining time as `MM:SS`, or `H:MM:SS` from one hour upwards
///
/// Partial seconds round up so a fresh three minute timer reads `03:00`.
pub fn format_remaining(remaining: Duration) -> String {
    let millis = remaining.num_milliseconds().max(0);
    let total = (millis + 999) / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// How long ago a timer finished, bucketed for the reminder body
pub fn format_finished_ago(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);

    if secs < 20 {
        "finished just now".to_string()
    } else if secs < 60 {
        format!("finished {:02} seconds ago", secs)
    } else {
        format!("finished {:02}:{:02} minutes ago", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_ago_buckets() {
        assert_eq!(format_finished_ago(Duration::seconds(0)), "finished just now");
        assert_eq!(format_finished_ago(Duration::seconds(5)), "finished just now");
        assert_eq!(format_finished_ago(Duration::seconds(19)), "finished just now");
        assert_eq!(format_finished_ago(Duration::seconds(20)), "finished 20 seconds ago");
        assert_eq!(format_finished_ago(Duration::seconds(45)), "finished 45 seconds ago");
        assert_eq!(format_finished_ago(Duration::seconds(60)), "finished 01:00 minutes ago");
        assert_eq!(format_finished_ago(Duration::seconds(125)), "finished 02:05 minutes ago");
        assert_eq!(format_finished_ago(Duration::seconds(3725)), "finished 62:05 minutes ago");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::seconds(210)), "03:30");
        assert_eq!(format_remaining(Duration::milliseconds(209_300)), "03:30");
        assert_eq!(format_remaining(Duration::seconds(59)), "00:59");
        assert_eq!(format_remaining(Duration::zero()), "00:00");
        assert_eq!(format_remaining(Duration::seconds(3599)), "59:59");
        assert_eq!(format_remaining(Duration::seconds(3600)), "1:00:00");
        assert_eq!(format_remaining(Duration::seconds(7384)), "2:03:04");
        assert_eq!(format_remaining(Duration::seconds(-4)), "00:00");
    }

    #[test]
    fn test_ready_title() {
        assert_eq!(ready_title("Earl Grey"), "Earl Grey is ready");
    }
}
