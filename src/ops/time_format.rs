/// Formats seconds as `m:ss`. Unknown (NaN, infinite, negative) renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Remaining time label shown under the seek bar, e.g. `-2:13`.
pub fn format_remaining(position: f64, duration: f64) -> String {
    format!("-{}", format_time(duration - position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn test_format_time_unknown_duration() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-12.0), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(30.0, 200.0), "-2:50");
        // Duration not loaded yet
        assert_eq!(format_remaining(4.0, 0.0), "-0:00");
    }
}
