//! Fixed-rate tick scheduling for the frame and physics loops.

use std::time::{Duration, Instant};

/// Schedules ticks at `rate` per second.
///
/// A tick is due once `now >= next_due`. After a tick the deadline advances
/// by one interval; if that still lies in the past the clock resynchronises
/// to `now + interval` instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next_due: Instant,
    last_tick: Option<Instant>,
}

fn interval_for(rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate.max(1)))
}

impl FrameClock {
    /// The first tick is due immediately.
    pub fn new(rate: u32, now: Instant) -> Self {
        Self {
            interval: interval_for(rate),
            next_due: now,
            last_tick: None,
        }
    }

    /// Change the rate. The already scheduled deadline is kept.
    pub fn set_rate(&mut self, rate: u32) {
        self.interval = interval_for(rate);
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Restart the schedule with a tick due at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_due = now;
        self.last_tick = None;
    }

    /// Consume a due tick, returning the time since the previous one
    /// (one interval for the first tick), or `None` if nothing is due.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        if now < self.next_due {
            return None;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        let elapsed = self
            .last_tick
            .map_or(self.interval, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        Some(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_in_one_second(rate: u32) -> u32 {
        let start = Instant::now();
        let mut clock = FrameClock::new(rate, start);
        (0..1000)
            .filter(|ms| {
                clock
                    .poll(start + Duration::from_millis(*ms))
                    .is_some()
            })
            .count() as u32
    }

    #[test]
    fn test_rate_matches_ticks_per_second() {
        for rate in [30, 60, 120] {
            let ticks = ticks_in_one_second(rate);
            assert!(
                (rate - 1..=rate + 1).contains(&ticks),
                "rate {rate} gave {ticks} ticks"
            );
        }
    }

    #[test]
    fn test_not_due_before_deadline() {
        let start = Instant::now();
        let mut clock = FrameClock::new(10, start);
        assert!(clock.poll(start).is_some());
        assert!(clock.poll(start + Duration::from_millis(50)).is_none());
        assert!(clock.poll(start + Duration::from_millis(100)).is_some());
    }

    #[test]
    fn test_resync_when_far_behind() {
        let start = Instant::now();
        let mut clock = FrameClock::new(10, start);
        clock.poll(start);
        let late = start + Duration::from_secs(5);
        assert_eq!(clock.poll(late), Some(Duration::from_secs(5)));
        assert_eq!(clock.next_due(), late + clock.interval());
        assert!(clock.poll(late + Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_set_rate_keeps_deadline() {
        let start = Instant::now();
        let mut clock = FrameClock::new(1, start);
        clock.poll(start);
        let due = clock.next_due();
        clock.set_rate(100);
        assert_eq!(clock.next_due(), due);
        assert_eq!(clock.interval(), Duration::from_millis(10));
    }
}
