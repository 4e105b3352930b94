//! Expiry countdown math for the confirmation page.

/// Window after which an unconfirmed payment is considered expired locally.
pub const EXPIRY_WINDOW_SECS: i64 = 15 * 60;

/// Seconds left before the payment window closes, clamped at zero.
///
/// Computed purely from the intent's creation timestamp; the web layer
/// re-evaluates this once per second and feeds a countdown-elapsed event to
/// the lifecycle controller when it hits zero.
#[must_use]
pub fn seconds_remaining(created_at_ms: i64, now_ms: i64) -> u64 {
    let expires_at_ms = created_at_ms + EXPIRY_WINDOW_SECS * 1_000;
    let left_ms = expires_at_ms - now_ms;
    if left_ms <= 0 {
        0
    } else {
        (left_ms / 1_000) as u64
    }
}

/// `mm:ss` rendering for the visible countdown.
#[must_use]
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::{EXPIRY_WINDOW_SECS, format_mm_ss, seconds_remaining};

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn full_window_at_creation_time() {
        assert_eq!(seconds_remaining(T0, T0), EXPIRY_WINDOW_SECS as u64);
    }

    #[test]
    fn reaches_exactly_zero_at_the_window_edge() {
        let at_edge = T0 + EXPIRY_WINDOW_SECS * 1_000;
        assert_eq!(seconds_remaining(T0, at_edge), 0);
        assert_eq!(seconds_remaining(T0, at_edge - 1_000), 1);
    }

    #[test]
    fn clamps_at_zero_past_the_window() {
        let late = T0 + (EXPIRY_WINDOW_SECS + 300) * 1_000;
        assert_eq!(seconds_remaining(T0, late), 0);
    }

    #[test]
    fn monotonically_non_increasing_over_ticks() {
        let mut prev = u64::MAX;
        for tick in 0..=(EXPIRY_WINDOW_SECS + 5) {
            let now = T0 + tick * 1_000;
            let left = seconds_remaining(T0, now);
            assert!(left <= prev, "countdown went up at tick {tick}");
            prev = left;
        }
        assert_eq!(prev, 0);
    }

    #[test]
    fn sub_second_remainders_floor() {
        assert_eq!(seconds_remaining(T0, T0 + 500), 899);
    }

    #[test]
    fn renders_minutes_and_seconds_zero_padded() {
        assert_eq!(format_mm_ss(900), "15:00");
        assert_eq!(format_mm_ss(61), "01:01");
        assert_eq!(format_mm_ss(9), "00:09");
        assert_eq!(format_mm_ss(0), "00:00");
    }
}
