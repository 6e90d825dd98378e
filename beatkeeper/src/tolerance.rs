//! # Tolerance Module - Grading a Tempo
//!
//! Maps a BPM value onto the fixed tolerance policy of the trainer:
//!
//! | Band | Range (BPM) | Feedback | Severity |
//! |---|---|---|---|
//! | [`Band::FatalLow`] | < 80 | slow | fatal |
//! | [`Band::Slow`] | [80, 90) | slow | warning |
//! | [`Band::OnTarget`] | [90, 110] | good | ok |
//! | [`Band::Fast`] | (110, 120] | fast | warning |
//! | [`Band::FatalHigh`] | > 120 | fast | fatal |
//!
//! Every integer maps to a band, including zero and negative values, which are
//! fatal-low.
//!
//! ```rust
//! use beatkeeper::tolerance::{classify, Band, FeedbackLevel, Severity};
//!
//! let grade = classify(85);
//! assert_eq!(grade.band, Band::Slow);
//! assert_eq!(grade.feedback, FeedbackLevel::Slow);
//! assert_eq!(grade.severity, Severity::Warning);
//!
//! assert!(classify(121).is_fatal());
//! ```

use strum::Display;

use crate::{Bpm, MAX_ACCEPTABLE_BPM, MAX_BPM, MIN_ACCEPTABLE_BPM, MIN_BPM};

/// A named BPM range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Band {
    FatalLow,
    Slow,
    OnTarget,
    Fast,
    FatalHigh,
}

/// Which way the player should correct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackLevel {
    /// Speed up
    Slow,
    /// Keep going
    Good,
    /// Slow down
    Fast,
}

/// How bad the current tempo is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Fatal,
}

/// The result of grading one BPM value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub band: Band,
    pub feedback: FeedbackLevel,
    pub severity: Severity,
}

impl Classification {
    /// Returns true if this tempo ends a game
    pub const fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }

    /// Returns true if this tempo is inside the success band
    pub const fn is_on_target(&self) -> bool {
        matches!(self.band, Band::OnTarget)
    }
}

impl From<Band> for Classification {
    fn from(band: Band) -> Self {
        let (feedback, severity) = match band {
            Band::FatalLow => (FeedbackLevel::Slow, Severity::Fatal),
            Band::Slow => (FeedbackLevel::Slow, Severity::Warning),
            Band::OnTarget => (FeedbackLevel::Good, Severity::Ok),
            Band::Fast => (FeedbackLevel::Fast, Severity::Warning),
            Band::FatalHigh => (FeedbackLevel::Fast, Severity::Fatal),
        };

        Self {
            band,
            feedback,
            severity,
        }
    }
}

/// Find the band a BPM value falls into
pub const fn band(bpm: Bpm) -> Band {
    if bpm < MIN_BPM {
        Band::FatalLow
    } else if bpm < MIN_ACCEPTABLE_BPM {
        Band::Slow
    } else if bpm <= MAX_ACCEPTABLE_BPM {
        Band::OnTarget
    } else if bpm <= MAX_BPM {
        Band::Fast
    } else {
        Band::FatalHigh
    }
}

/// Grade a BPM value against the full policy
pub fn classify(bpm: Bpm) -> Classification {
    band(bpm).into()
}

/// Grade a BPM value for warm-up feedback
///
/// A warm-up never ends on a bad tempo, so fatal bands are softened to warnings.
/// The feedback direction is the same as [`classify`].
pub fn classify_warmup(bpm: Bpm) -> Classification {
    let mut grade = classify(bpm);
    if grade.is_fatal() {
        grade.severity = Severity::Warning;
    }
    grade
}

/// Position of a tempo on a gauge running from [`MIN_BPM`] to [`MAX_BPM`]
///
/// Returns a ratio between 0.0 (80 BPM or slower) and 1.0 (120 BPM or faster).
/// The standard tempo sits in the middle.
pub fn gauge_ratio(bpm: Bpm) -> f64 {
    let span = (MAX_BPM - MIN_BPM) as f64;
    (bpm.saturating_sub(MIN_BPM) as f64 / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::STANDARD_BPM;

    #[test]
    fn test_band_edges() {
        assert_eq!(band(79), Band::FatalLow);
        assert_eq!(band(80), Band::Slow);
        assert_eq!(band(89), Band::Slow);
        assert_eq!(band(90), Band::OnTarget);
        assert_eq!(band(100), Band::OnTarget);
        assert_eq!(band(110), Band::OnTarget);
        assert_eq!(band(111), Band::Fast);
        assert_eq!(band(120), Band::Fast);
        assert_eq!(band(121), Band::FatalHigh);
    }

    #[test]
    fn test_total_over_integers() {
        assert_eq!(band(0), Band::FatalLow);
        assert_eq!(band(-40), Band::FatalLow);
        assert_eq!(band(Bpm::MIN), Band::FatalLow);
        assert_eq!(band(Bpm::MAX), Band::FatalHigh);
    }

    #[test]
    fn test_classification() {
        let grade = classify(STANDARD_BPM);
        assert_eq!(grade.feedback, FeedbackLevel::Good);
        assert_eq!(grade.severity, Severity::Ok);
        assert!(grade.is_on_target());
        assert!(!grade.is_fatal());

        let grade = classify(115);
        assert_eq!(grade.feedback, FeedbackLevel::Fast);
        assert_eq!(grade.severity, Severity::Warning);

        let grade = classify(60);
        assert_eq!(grade.feedback, FeedbackLevel::Slow);
        assert_eq!(grade.severity, Severity::Fatal);
        assert!(grade.is_fatal());

        let grade = classify(150);
        assert_eq!(grade.feedback, FeedbackLevel::Fast);
        assert!(grade.is_fatal());
    }

    #[test]
    fn test_warmup_is_never_fatal() {
        let grade = classify_warmup(150);
        assert_eq!(grade.band, Band::FatalHigh);
        assert_eq!(grade.feedback, FeedbackLevel::Fast);
        assert_eq!(grade.severity, Severity::Warning);

        let grade = classify_warmup(95);
        assert_eq!(grade.severity, Severity::Ok);
    }

    #[test]
    fn test_gauge_ratio() {
        assert_eq!(gauge_ratio(80), 0.0);
        assert_eq!(gauge_ratio(STANDARD_BPM), 0.5);
        assert_eq!(gauge_ratio(120), 1.0);
        assert_eq!(gauge_ratio(30), 0.0);
        assert_eq!(gauge_ratio(300), 1.0);
        assert_eq!(gauge_ratio(90), 0.25);
    }

    #[test]
    fn test_display() {
        assert_eq!(FeedbackLevel::Good.to_string(), "good");
        assert_eq!(Severity::Fatal.to_string(), "fatal");
        assert_eq!(Band::OnTarget.to_string(), "on-target");
    }
}
