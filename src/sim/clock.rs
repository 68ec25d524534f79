//! Wall-clock to game-tick conversion
//!
//! Call [`Clock::advance`] once per frame. The clock keeps one open interval;
//! once a full tick length has elapsed inside it, the tick counter moves and
//! `tick_just_crossed` is set for that frame only.
//!
//! Under [`TickPolicy::DropExcess`] the next interval opens at the time of the
//! crossing frame itself, not on the following `advance` call. Frames 1.2s
//! apart therefore cross one tick each, and the frame gap after a crossing is
//! counted toward the next tick instead of being lost.

use std::time::{Duration, Instant};

use crate::consts::{DEFAULT_TICK_LENGTH, MAX_CATCH_UP_TICKS};
use crate::{Settings, TickPolicy};

/// Game clock. Under `DropExcess` a crossing restarts the interval at that
/// frame's `now`, so back-to-back 1.2s frames each report one tick.
#[derive(Debug, Clone)]
pub struct Clock {
    tick_length: Duration,
    policy: TickPolicy,
    max_catch_up: u32,
    /// Start of the open interval, if one is open
    interval_start: Option<Instant>,
    ticks_since_start: u64,
    tick_just_crossed: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_LENGTH, TickPolicy::DropExcess)
    }
}

impl Clock {
    pub fn new(tick_length: Duration, policy: TickPolicy) -> Self {
        Self {
            tick_length: tick_length.max(Duration::from_millis(1)),
            policy,
            max_catch_up: MAX_CATCH_UP_TICKS,
            interval_start: None,
            ticks_since_start: 0,
            tick_just_crossed: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut clock = Self::new(settings.tick_length(), settings.tick_policy);
        clock.max_catch_up = settings.max_catch_up_ticks.max(1);
        clock
    }

    /// Advance against the real clock; returns the number of ticks crossed
    pub fn advance(&mut self) -> u32 {
        self.advance_at(Instant::now())
    }

    /// Advance as if the current time were `now`
    pub fn advance_at(&mut self, now: Instant) -> u32 {
        let start = *self.interval_start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);

        if elapsed < self.tick_length {
            self.tick_just_crossed = false;
            return 0;
        }

        let crossed = match self.policy {
            TickPolicy::DropExcess => {
                self.interval_start = Some(now);
                1
            }
            TickPolicy::CatchUp => {
                let whole = (elapsed.as_nanos() / self.tick_length.as_nanos()) as u64;
                if whole > u64::from(self.max_catch_up) {
                    // Too far behind: report the cap and drop the rest
                    self.interval_start = Some(now);
                    self.max_catch_up
                } else {
                    let whole = whole as u32;
                    self.interval_start = Some(start + self.tick_length * whole);
                    whole
                }
            }
        };

        self.ticks_since_start += u64::from(crossed);
        self.tick_just_crossed = true;
        log::trace!("Tick boundary crossed x{} (total {})", crossed, self.ticks_since_start);
        crossed
    }

    /// Ticks elapsed since the clock started; doubles as game time in seconds
    pub fn ticks_since_start(&self) -> u64 {
        self.ticks_since_start
    }

    /// True only on the frame a tick boundary was crossed
    pub fn tick_just_crossed(&self) -> bool {
        self.tick_just_crossed
    }

    /// Time accumulated in the open interval (zero when none is open)
    pub fn elapsed_in_tick(&self, now: Instant) -> Duration {
        self.interval_start
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }

    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    /// Close the open interval and zero the counters
    pub fn reset(&mut self) {
        self.interval_start = None;
        self.ticks_since_start = 0;
        self.tick_just_crossed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_advance_opens_interval() {
        let mut clock = Clock::default();
        let t0 = Instant::now();
        assert_eq!(clock.advance_at(t0), 0);
        assert!(!clock.tick_just_crossed());
        assert_eq!(clock.elapsed_in_tick(t0 + ms(300)), ms(300));
    }

    #[test]
    fn test_crossing_is_edge_triggered() {
        let mut clock = Clock::default();
        let t0 = Instant::now();
        clock.advance_at(t0);
        assert_eq!(clock.advance_at(t0 + ms(999)), 0);
        assert_eq!(clock.advance_at(t0 + ms(1000)), 1);
        assert!(clock.tick_just_crossed());
        assert_eq!(clock.advance_at(t0 + ms(1010)), 0);
        assert!(!clock.tick_just_crossed());
        assert_eq!(clock.ticks_since_start(), 1);
    }

    #[test]
    fn test_slow_frames_drop_excess() {
        let mut clock = Clock::default();
        let t0 = Instant::now();
        clock.advance_at(t0);
        assert_eq!(clock.advance_at(t0 + ms(1200)), 1);
        assert_eq!(clock.ticks_since_start(), 1);
        assert_eq!(clock.advance_at(t0 + ms(2400)), 1);
        assert_eq!(clock.ticks_since_start(), 2);
        // A three-second stall still reports a single crossing
        assert_eq!(clock.advance_at(t0 + ms(5400)), 1);
        assert_eq!(clock.ticks_since_start(), 3);
    }

    #[test]
    fn test_catch_up_reports_every_whole_tick() {
        let mut clock = Clock::new(ms(1000), TickPolicy::CatchUp);
        let t0 = Instant::now();
        clock.advance_at(t0);
        assert_eq!(clock.advance_at(t0 + ms(3500)), 3);
        assert_eq!(clock.ticks_since_start(), 3);
        // The leftover 500ms carries into the next interval
        assert_eq!(clock.advance_at(t0 + ms(4000)), 1);
        assert_eq!(clock.ticks_since_start(), 4);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let settings = Settings {
            tick_policy: TickPolicy::CatchUp,
            max_catch_up_ticks: 2,
            ..Default::default()
        };
        let mut clock = Clock::from_settings(&settings);
        let t0 = Instant::now();
        clock.advance_at(t0);
        assert_eq!(clock.advance_at(t0 + ms(10_000)), 2);
        assert_eq!(clock.advance_at(t0 + ms(10_500)), 0);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut clock = Clock::default();
        let t0 = Instant::now() + ms(5000);
        clock.advance_at(t0);
        assert_eq!(clock.advance_at(t0 - ms(2000)), 0);
        assert_eq!(clock.ticks_since_start(), 0);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::new(ms(100), TickPolicy::DropExcess);
        let t0 = Instant::now();
        clock.advance_at(t0);
        clock.advance_at(t0 + ms(150));
        clock.reset();
        assert_eq!(clock.ticks_since_start(), 0);
        assert!(!clock.tick_just_crossed());
        assert_eq!(clock.elapsed_in_tick(t0 + ms(200)), Duration::ZERO);
    }
}
