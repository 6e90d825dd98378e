//! # Estimator Module - Taps to Tempo
//!
//! Pure functions that turn an ordered run of tap timestamps into a BPM value.
//!
//! The estimate is `round(60000 / mean_interval)`, where the mean is taken over the
//! consecutive differences of the timestamps in scope. Scope is either the whole
//! run, or the last `window` timestamps when recent tempo should outweigh history.
//!
//! ```rust
//! use beatkeeper::estimator::estimate;
//!
//! // Full run: two 600ms intervals
//! assert_eq!(estimate(&[0, 600, 1200], None), Some(100));
//!
//! // Only the last two taps count: one 500ms interval
//! assert_eq!(estimate(&[0, 600, 1200, 1700], Some(2)), Some(120));
//!
//! // Not enough taps, or time running backwards, gives no estimate
//! assert_eq!(estimate(&[0], None), None);
//! assert_eq!(estimate(&[600, 0], None), None);
//! ```

use crate::{Bpm, MILLIS_PER_MINUTE, Millis};

/// Iterate over the consecutive differences of `timestamps`
pub fn intervals(timestamps: &[Millis]) -> impl Iterator<Item = Millis> + '_ {
    timestamps.windows(2).map(|pair| pair[1] - pair[0])
}

/// Convert a single interval to a BPM value
///
/// Returns `None` for intervals that are zero or negative.
pub fn interval_bpm(interval: Millis) -> Option<Bpm> {
    if interval <= 0 {
        return None;
    }
    Some(to_bpm(interval as f64))
}

/// Estimate the tempo of a run of taps
///
/// * `timestamps` - Tap times in milliseconds, oldest first
/// * `window` - If set, only the last `window` timestamps are used
///
/// Returns `None` if fewer than two timestamps are in scope, or if any interval in
/// scope is zero or negative. Callers keep their previous estimate in that case.
pub fn estimate(timestamps: &[Millis], window: Option<usize>) -> Option<Bpm> {
    let scope = match window {
        Some(size) => &timestamps[timestamps.len().saturating_sub(size)..],
        None => timestamps,
    };

    if scope.len() < 2 {
        return None;
    }

    let mut total = 0;
    for interval in intervals(scope) {
        if interval <= 0 {
            return None;
        }
        total += interval;
    }

    let mean = total as f64 / (scope.len() - 1) as f64;
    Some(to_bpm(mean))
}

/// Estimate from the most recent interval only
///
/// This is the "instantaneous" tempo, used for live feedback while calibrating.
pub fn latest(timestamps: &[Millis]) -> Option<Bpm> {
    estimate(timestamps, Some(2))
}

fn to_bpm(interval_ms: f64) -> Bpm {
    (MILLIS_PER_MINUTE / interval_ms).round() as Bpm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_taps() {
        assert_eq!(estimate(&[0, 600], None), Some(100));
        assert_eq!(estimate(&[1000, 1500], None), Some(120));
        assert_eq!(estimate(&[0, 750], None), Some(80));

        // Rounding: 60000 / 700 = 85.71...
        assert_eq!(estimate(&[0, 700], None), Some(86));
        // 60000 / 640 = 93.75
        assert_eq!(estimate(&[0, 640], None), Some(94));
    }

    #[test]
    fn test_mean_of_intervals() {
        // Intervals 500 and 700, mean 600
        assert_eq!(estimate(&[0, 500, 1200], None), Some(100));
        // Intervals 400, 600, 800 -> mean 600
        assert_eq!(estimate(&[0, 400, 1000, 1800], None), Some(100));
    }

    #[test]
    fn test_window() {
        let taps = [0, 1000, 2000, 2600, 3200, 3800];

        // Full run mixes the slow start in
        assert_eq!(estimate(&taps, None), Some(79));
        // Last four taps are all 600ms apart
        assert_eq!(estimate(&taps, Some(4)), Some(100));
        // Window larger than the run uses everything
        assert_eq!(estimate(&taps, Some(100)), estimate(&taps, None));
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(estimate(&[], None), None);
        assert_eq!(estimate(&[42], None), None);
        assert_eq!(estimate(&[0, 600, 1200], Some(1)), None);
        assert_eq!(estimate(&[0, 600, 1200], Some(0)), None);

        // Zero or negative intervals never produce a value
        assert_eq!(estimate(&[100, 100], None), None);
        assert_eq!(estimate(&[0, 600, 300], None), None);
    }

    #[test]
    fn test_window_skips_bad_history() {
        // The bad interval falls outside the window
        assert_eq!(estimate(&[500, 0, 600, 1200, 1800], Some(3)), Some(100));
    }

    #[test]
    fn test_interval_bpm() {
        assert_eq!(interval_bpm(600), Some(100));
        assert_eq!(interval_bpm(1), Some(60_000));
        assert_eq!(interval_bpm(0), None);
        assert_eq!(interval_bpm(-5), None);
    }

    #[test]
    fn test_latest_uses_last_interval() {
        assert_eq!(latest(&[0, 1000, 1500]), Some(120));
        assert_eq!(latest(&[0]), None);
    }

    #[test]
    fn test_intervals() {
        let collected: Vec<Millis> = intervals(&[0, 100, 350]).collect();
        assert_eq!(collected, vec![100, 250]);
        assert_eq!(intervals(&[7]).count(), 0);
    }
}
