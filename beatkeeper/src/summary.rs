//! # Summary Module - Final Game Report
//!
//! Computes the end-of-game report from the full tap log of a game phase.
//!
//! ## Formulas
//!
//! Each consecutive pair of taps yields one interval and one per-interval BPM
//! sample, `round(60000 / interval)`.
//!
//! - **Average BPM**: `round(60000 / mean(intervals))`. This is the same formula the
//!   live estimator uses, so the average agrees with what the player saw. It is
//!   *not* the mean of the per-interval samples, which overweights short intervals.
//! - **Min / Max BPM**: smallest and largest per-interval sample.
//! - **Consistency**: how steady the per-interval samples are, as a percentage
//!   where 100 means every interval was identical.
//!
//! ```rust
//! use beatkeeper::summary::summarize;
//!
//! let summary = summarize(&[0, 600, 1200, 1800]);
//! assert_eq!(summary.average_bpm, 100);
//! assert_eq!(summary.min_bpm, 100);
//! assert_eq!(summary.max_bpm, 100);
//! assert_eq!(summary.total_taps, 4);
//! ```

use crate::estimator::{self, interval_bpm, intervals};
use crate::{Bpm, MILLIS_PER_MINUTE, Millis};

/// End-of-game statistics
///
/// With fewer than two taps every tempo value is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub average_bpm: Bpm,
    pub min_bpm: Bpm,
    pub max_bpm: Bpm,
    pub total_taps: usize,
    /// Time from the first to the last tap
    pub duration_ms: Millis,
    /// Tempo steadiness as a percentage between 0.0 - 100.0
    pub consistency: f64,
}

impl Summary {
    /// Returns true if the summary was computed from at least one interval
    pub const fn has_tempo(&self) -> bool {
        self.average_bpm > 0
    }
}

/// Summarize a game's tap log
pub fn summarize(taps: &[Millis]) -> Summary {
    let total_taps = taps.len();
    let samples: Vec<Bpm> = intervals(taps).filter_map(interval_bpm).collect();

    let (Some(&min_bpm), Some(&max_bpm)) = (samples.iter().min(), samples.iter().max()) else {
        return Summary {
            total_taps,
            ..Summary::default()
        };
    };

    let average_bpm = average(taps).unwrap_or_default();
    let duration_ms = match (taps.first(), taps.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0,
    };

    Summary {
        average_bpm,
        min_bpm,
        max_bpm,
        total_taps,
        duration_ms,
        consistency: consistency(&samples),
    }
}

/// Average over the positive intervals only
///
/// Non-monotonic pairs never reach the game log, but a caller may hand in any
/// slice, so they are skipped rather than invalidating the whole report.
fn average(taps: &[Millis]) -> Option<Bpm> {
    estimator::estimate(taps, None).or_else(|| {
        let positive: Vec<Millis> = intervals(taps).filter(|&i| i > 0).collect();
        if positive.is_empty() {
            return None;
        }
        let mean = positive.iter().sum::<Millis>() as f64 / positive.len() as f64;
        Some((MILLIS_PER_MINUTE / mean).round() as Bpm)
    })
}

/// Coefficient of variation of the samples, mapped onto 0.0 - 100.0
fn consistency(samples: &[Bpm]) -> f64 {
    if samples.len() <= 1 {
        return 100.0;
    }

    // Welford's online algorithm for numerically stable variance calculation
    let mut mean = 0.0;
    let mut m2 = 0.0;

    for (i, &value) in samples.iter().enumerate() {
        let value = value as f64;
        let delta = value - mean;
        mean += delta / (i + 1) as f64;
        let delta2 = value - mean;
        m2 += delta * delta2;
    }

    if mean == 0.0 {
        return 100.0;
    }

    // Population standard deviation
    let std_dev = (m2 / samples.len() as f64).sqrt();
    let cv = std_dev / mean;
    ((1.0 - cv.min(1.0)) * 100.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_game() {
        let summary = summarize(&[0, 600, 1200, 1800]);
        assert_eq!(summary.average_bpm, 100);
        assert_eq!(summary.min_bpm, 100);
        assert_eq!(summary.max_bpm, 100);
        assert_eq!(summary.total_taps, 4);
        assert_eq!(summary.duration_ms, 1800);
        assert_eq!(summary.consistency, 100.0);
        assert!(summary.has_tempo());
    }

    #[test]
    fn test_uneven_game() {
        // Intervals 500 (120), 600 (100), 750 (80)
        let summary = summarize(&[0, 500, 1100, 1850]);
        assert_eq!(summary.min_bpm, 80);
        assert_eq!(summary.max_bpm, 120);
        // Mean interval 616.67 -> 97.3
        assert_eq!(summary.average_bpm, 97);
        assert!(summary.consistency < 100.0);
        assert!(summary.consistency > 80.0);
    }

    #[test]
    fn test_average_is_not_mean_of_samples() {
        // Intervals 400 (150) and 800 (75): sample mean is 112.5,
        // but the mean interval of 600 gives 100
        let summary = summarize(&[0, 400, 1200]);
        assert_eq!(summary.average_bpm, 100);
    }

    #[test]
    fn test_too_few_taps() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());

        let summary = summarize(&[1234]);
        assert_eq!(summary.total_taps, 1);
        assert_eq!(summary.average_bpm, 0);
        assert_eq!(summary.min_bpm, 0);
        assert_eq!(summary.max_bpm, 0);
        assert!(!summary.has_tempo());
    }

    #[test]
    fn test_bad_intervals_are_skipped() {
        let summary = summarize(&[0, 600, 600, 1200]);
        assert_eq!(summary.total_taps, 4);
        assert_eq!(summary.min_bpm, 100);
        assert_eq!(summary.max_bpm, 100);
        assert_eq!(summary.average_bpm, 100);
    }

    #[test]
    fn test_skipped_intervals_use_the_exact_mean() {
        // Positive intervals 1 and 2: the mean interval is 1.5ms, which must not be
        // rounded to 2ms before converting
        let summary = summarize(&[0, 1, 1, 3]);
        assert_eq!(summary.average_bpm, 40_000);
    }
}
