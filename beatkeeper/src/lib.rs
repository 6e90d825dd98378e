//! # beatkeeper
//!
//! A small engine for tap-tempo rhythm trainers. A player taps along to a target
//! tempo, the engine turns tap timestamps into a BPM estimate, grades the estimate
//! against fixed tolerance bands and drives a `Start -> Warmup -> Game -> Result`
//! state machine.
//!
//! Everything around the engine (rendering, key handling, media playback) is a
//! collaborator: taps come in through [`engine::TempoEngine::on_tap`], playback is
//! requested through a [`media::MediaController`] and state changes go out as typed
//! [`notification::Notification`]s.
//!
//! ```rust
//! use beatkeeper::engine::TempoEngine;
//! use beatkeeper::Mode;
//!
//! let mut engine = TempoEngine::without_media();
//! engine.start_warmup();
//!
//! // Eight taps at 600ms intervals is exactly 100 BPM
//! for tap in 0..8 {
//!     engine.on_tap(tap * 600);
//! }
//!
//! assert_eq!(engine.state().mode, Mode::Game);
//! assert_eq!(engine.state().current_bpm, 100);
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod estimator;
pub mod media;
pub mod notification;
pub mod recorder;
pub mod summary;
pub mod tolerance;

pub use config::Configuration;
pub use engine::{GameState, Mode, Outcome, TapResponse, TempoEngine};
pub use notification::{Notification, SubscriptionId};
pub use summary::Summary;
pub use tolerance::{Band, Classification, FeedbackLevel, Severity};

// Types for more general type-safety
/// Milliseconds since an arbitrary monotonic epoch
pub type Millis = i64;
/// Beats per minute, rounded to the nearest integer
pub type Bpm = i64;

/// Milliseconds in one minute
pub(crate) const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// The tempo the trainer asks the player to hold
pub const STANDARD_BPM: Bpm = 100;
/// Lowest tempo counted as on target
pub const MIN_ACCEPTABLE_BPM: Bpm = 90;
/// Highest tempo counted as on target
pub const MAX_ACCEPTABLE_BPM: Bpm = 110;
/// Anything below this ends the game
pub const MIN_BPM: Bpm = 80;
/// Anything above this ends the game
pub const MAX_BPM: Bpm = 120;
/// Number of taps in a warm-up round
pub const WARMUP_COUNT: usize = 8;
/// Number of most recent taps used for the live estimate during a game
pub const GAME_WINDOW: usize = 4;
