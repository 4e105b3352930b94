//! Backoff schedule for the status poller.
//!
//! The async loop that drives the queries lives in the web crate; this module
//! only owns the arithmetic so it can be tested natively.

/// Delay before the first status query, in milliseconds.
pub const INITIAL_DELAY_MS: u32 = 5_000;
/// Upper bound for any single inter-attempt delay.
pub const MAX_DELAY_MS: u32 = 20_000;
/// Polling stops for good once this many queries have been scheduled.
pub const MAX_ATTEMPTS: u32 = 30;

/// Ephemeral attempt counter plus the next scheduled delay.
///
/// Each subsequent delay is the previous one grown by 1.5x, capped at
/// [`MAX_DELAY_MS`]. Lives only for one poller run; a fresh mount gets a
/// fresh schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSchedule {
    attempt: u32,
    delay_ms: u32,
}

impl PollSchedule {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attempt: 0,
            delay_ms: INITIAL_DELAY_MS,
        }
    }

    /// Delay to wait before the next query, or `None` once the attempt
    /// ceiling has been reached.
    pub fn next_delay(&mut self) -> Option<u32> {
        if self.attempt >= MAX_ATTEMPTS {
            return None;
        }
        self.attempt += 1;
        let current = self.delay_ms;
        // Grow by 1.5x in integer arithmetic, capped.
        self.delay_ms = (current + current / 2).min(MAX_DELAY_MS);
        Some(current)
    }

    #[must_use]
    pub const fn attempts_made(&self) -> u32 {
        self.attempt
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{INITIAL_DELAY_MS, MAX_ATTEMPTS, MAX_DELAY_MS, PollSchedule};

    #[test]
    fn first_delay_is_the_initial_delay() {
        let mut schedule = PollSchedule::new();
        assert_eq!(schedule.next_delay(), Some(INITIAL_DELAY_MS));
    }

    #[test]
    fn delays_grow_by_half_until_the_cap() {
        let mut schedule = PollSchedule::new();
        let delays: Vec<u32> = std::iter::from_fn(|| schedule.next_delay())
            .take(6)
            .collect();
        assert_eq!(delays, vec![5_000, 7_500, 11_250, 16_875, 20_000, 20_000]);
    }

    #[test]
    fn schedule_exhausts_after_the_ceiling() {
        let mut schedule = PollSchedule::new();
        for _ in 0..MAX_ATTEMPTS {
            assert!(schedule.next_delay().is_some());
        }
        assert_eq!(schedule.next_delay(), None);
        assert_eq!(schedule.next_delay(), None);
        assert_eq!(schedule.attempts_made(), MAX_ATTEMPTS);
    }

    #[test]
    fn delays_never_exceed_the_cap() {
        let mut schedule = PollSchedule::new();
        while let Some(delay) = schedule.next_delay() {
            assert!(delay <= MAX_DELAY_MS);
        }
    }
}
