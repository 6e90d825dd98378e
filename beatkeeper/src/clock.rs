//! # Clock Module - Tap Timestamps
//!
//! The engine only ever sees plain millisecond timestamps. A [`Clock`] is what an
//! input source uses to stamp a tap before handing it over.

use std::cell::Cell;

use web_time::Instant;

use crate::Millis;

/// A monotonic source of millisecond timestamps
pub trait Clock {
    /// Milliseconds since this clock's epoch
    fn now(&self) -> Millis;
}

/// Wall-clock time measured from when the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        Millis::try_from(self.epoch.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

/// A clock that only moves when told to
///
/// Useful for driving an engine deterministically in tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub const fn starting_at(now: Millis) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock forward by `millis`
    pub fn advance(&self, millis: Millis) {
        self.now.set(self.now.get() + millis);
    }

    /// Move the clock to an absolute time
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(first >= 0);
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::starting_at(1000);
        assert_eq!(clock.now(), 1000);

        clock.advance(600);
        assert_eq!(clock.now(), 1600);

        clock.set(0);
        assert_eq!(clock.now(), 0);
    }
}
