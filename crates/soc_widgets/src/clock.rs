use core::time::Duration;

use chrono::{Local, NaiveTime, TimeDelta};

/// Shown wherever a timestamp is expected but none exists yet.
pub const CLOCK_PLACEHOLDER: &str = "00:00:00";

/// Current wall-clock time of day in the local timezone.
pub fn local_now() -> NaiveTime {
    Local::now().time()
}

/// 24h `HH:MM:SS`.
pub fn format_hms(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Moves `t` back by `by`, wrapping around midnight.
pub fn rewind(t: NaiveTime, by: Duration) -> NaiveTime {
    let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::zero());
    t.overflowing_sub_signed(delta).0
}

/// Coarse "time ago" label used by the header.
pub fn since_label(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0..=4 => "just now".to_string(),
        5..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_format_is_zero_padded_24h() {
        assert_eq!(format_hms(hms(7, 3, 9)), "07:03:09");
        assert_eq!(format_hms(hms(23, 59, 59)), "23:59:59");
    }

    #[test]
    fn test_rewind_wraps_midnight() {
        assert_eq!(rewind(hms(0, 0, 1), Duration::from_secs(3)), hms(23, 59, 58));
        assert_eq!(rewind(hms(12, 0, 0), Duration::from_secs(90)), hms(11, 58, 30));
    }

    #[test]
    fn test_since_label_buckets() {
        assert_eq!(since_label(Duration::from_secs(2)), "just now");
        assert_eq!(since_label(Duration::from_secs(42)), "42s ago");
        assert_eq!(since_label(Duration::from_secs(125)), "2m ago");
        assert_eq!(since_label(Duration::from_secs(7300)), "2h ago");
    }
}
