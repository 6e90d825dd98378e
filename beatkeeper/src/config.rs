//! # Configuration Module - Engine Tunables
//!
//! This module provides the few knobs of the tempo engine that are not part of the
//! fixed tolerance policy. The BPM bands themselves never change at runtime; what
//! can change is how long the warm-up is and how many taps feed the live estimate.
//!
//! ## Usage
//!
//! ```rust
//! use beatkeeper::config::Configuration;
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.warmup_count, 8);
//!
//! // Custom configuration
//! let config = Configuration {
//!     warmup_count: 4,
//!     game_window: 6,
//! };
//! ```
//!
//! ## Responsiveness
//!
//! - **Game Window**: A smaller window reacts faster to tempo drift but lets a single
//!   mistimed tap swing the estimate. A larger window smooths more and reacts later.

use crate::{GAME_WINDOW, WARMUP_COUNT};

/// Runtime configuration for a tempo engine
///
/// All settings default to the standard trainer policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// Number of taps that make up one warm-up round
    ///
    /// Reaching this count evaluates the warm-up.
    ///
    /// **Default**: 8
    pub warmup_count: usize,

    /// Number of most recent taps used for the live game estimate
    ///
    /// A window of `n` taps averages the last `n - 1` intervals.
    ///
    /// **Default**: 4
    pub game_window: usize,
}

impl Configuration {
    /// Clamp values the engine can not work with
    ///
    /// A warm-up needs at least two taps to produce an interval, and so does the
    /// sliding window.
    pub(crate) fn sanitized(self) -> Self {
        Self {
            warmup_count: self.warmup_count.max(2),
            game_window: self.game_window.max(2),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            warmup_count: WARMUP_COUNT,
            game_window: GAME_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_policy() {
        let config = Configuration::default();
        assert_eq!(config.warmup_count, WARMUP_COUNT);
        assert_eq!(config.game_window, GAME_WINDOW);
    }

    #[test]
    fn test_sanitized_raises_degenerate_values() {
        let config = Configuration {
            warmup_count: 0,
            game_window: 1,
        }
        .sanitized();
        assert_eq!(config.warmup_count, 2);
        assert_eq!(config.game_window, 2);
    }
}
