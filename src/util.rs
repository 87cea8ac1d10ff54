/// Renders elapsed whole seconds as "12s" or "3m 12s"; the minutes
/// component is omitted entirely while it is zero.
pub fn format_session_time(elapsed_secs: u64) -> String {
    let minutes = elapsed_secs / 60;
    let seconds = elapsed_secs % 60;

    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Press rate display, always an integer per minute.
pub fn format_press_rate(rate: u64) -> String {
    format!("{rate}/min")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_only_below_one_minute() {
        assert_eq!(format_session_time(0), "0s");
        assert_eq!(format_session_time(12), "12s");
        assert_eq!(format_session_time(59), "59s");
    }

    #[test]
    fn minutes_appear_at_sixty_seconds() {
        assert_eq!(format_session_time(60), "1m 0s");
        assert_eq!(format_session_time(72), "1m 12s");
        assert_eq!(format_session_time(3599), "59m 59s");
    }

    #[test]
    fn no_zero_minutes_prefix() {
        assert!(!format_session_time(12).contains('m'));
    }

    #[test]
    fn press_rate_display() {
        assert_eq!(format_press_rate(0), "0/min");
        assert_eq!(format_press_rate(42), "42/min");
    }
}
