//! # Recorder Module - Tap Logs
//!
//! An append-only, ordered log of tap timestamps for one phase of play. A log can
//! be bounded, in which case taps past the capacity are silently dropped, or
//! unbounded.
//!
//! ```rust
//! use beatkeeper::recorder::TapLog;
//!
//! let mut log = TapLog::bounded(2);
//! assert!(log.record(0));
//! assert!(log.record(600));
//! assert!(!log.record(1200)); // Dropped, log is full
//! assert_eq!(log.as_slice(), &[0, 600]);
//! ```

use crate::Millis;

/// Ordered tap timestamps for one phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapLog {
    taps: Vec<Millis>,
    capacity: Option<usize>,
}

impl TapLog {
    /// Create a log without a length limit
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create a log that holds at most `capacity` taps
    pub fn bounded(capacity: usize) -> Self {
        Self {
            taps: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Append a tap
    ///
    /// Returns false if the log is full and the tap was dropped.
    pub fn record(&mut self, timestamp: Millis) -> bool {
        if self.is_full() {
            return false;
        }
        self.taps.push(timestamp);
        true
    }

    /// Returns true if a bounded log has reached its capacity
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|capacity| self.taps.len() >= capacity)
    }

    /// The configured capacity, if any
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of taps recorded
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Returns true if no taps have been recorded
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// The most recent tap
    pub fn last(&self) -> Option<Millis> {
        self.taps.last().copied()
    }

    /// The last `size` taps, or all of them if fewer are recorded
    pub fn window(&self, size: usize) -> &[Millis] {
        &self.taps[self.taps.len().saturating_sub(size)..]
    }

    /// All recorded taps, oldest first
    pub fn as_slice(&self) -> &[Millis] {
        &self.taps
    }

    /// Forget every tap, keeping the capacity
    pub fn clear(&mut self) {
        self.taps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_appends() {
        let mut log = TapLog::unbounded();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), None);

        for i in 0..1000 {
            assert!(log.record(i * 10));
        }

        assert_eq!(log.len(), 1000);
        assert!(!log.is_full());
        assert_eq!(log.last(), Some(9990));
    }

    #[test]
    fn test_bounded_drops_past_capacity() {
        let mut log = TapLog::bounded(8);
        for i in 0..8 {
            assert!(log.record(i * 600));
        }
        assert!(log.is_full());

        // A ninth tap has no effect
        assert!(!log.record(8 * 600));
        assert_eq!(log.len(), 8);
        assert_eq!(log.last(), Some(7 * 600));
    }

    #[test]
    fn test_window() {
        let mut log = TapLog::unbounded();
        assert!(log.window(4).is_empty());

        log.record(0);
        log.record(100);
        assert_eq!(log.window(4), &[0, 100]);

        log.record(200);
        log.record(300);
        log.record(400);
        assert_eq!(log.window(4), &[100, 200, 300, 400]);
        assert_eq!(log.window(0), &[] as &[Millis]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut log = TapLog::bounded(2);
        log.record(0);
        log.record(1);
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.capacity(), Some(2));
        assert!(log.record(5));
    }
}
