//! # Engine Module - Tempo Game State Machine
//!
//! This module provides the high-level interface for running a tap-tempo game. It
//! owns the game state and coordinates the estimator, the tolerance classifier and
//! the tap logs behind one input method, [`TempoEngine::on_tap`].
//!
//! ## Key Features
//!
//! - **Calibration**: An eight tap warm-up that must average between 90 and 110 BPM
//! - **Live Feedback**: A reading after every tap, published to subscribers
//! - **Smoothing**: Game tempo is estimated over the last four taps only
//! - **Media Coordination**: Playback starts with the game and pauses when it ends
//!
//! ## Game Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/engine_lifecycle.mmd")]
//!
//! ## Usage Examples
//!
//! ### A full game
//!
//! ```rust
//! use beatkeeper::engine::TempoEngine;
//! use beatkeeper::{Mode, Outcome};
//!
//! let mut engine = TempoEngine::without_media();
//! engine.start_warmup();
//!
//! let mut now = 0;
//! for _ in 0..8 {
//!     engine.on_tap(now);
//!     now += 600;
//! }
//! assert_eq!(engine.state().mode, Mode::Game);
//!
//! for _ in 0..16 {
//!     engine.on_tap(now);
//!     now += 580;
//! }
//!
//! // The backing track finished while the player was still on tempo
//! engine.on_media_ended();
//!
//! let state = engine.state();
//! assert_eq!(state.mode, Mode::Result);
//! assert_eq!(state.outcome, Some(Outcome::Success));
//! assert_eq!(state.beat_count, 16);
//! ```
//!
//! ### Losing the beat
//!
//! ```rust
//! use beatkeeper::engine::TempoEngine;
//! use beatkeeper::{Mode, Outcome};
//!
//! let mut engine = TempoEngine::without_media();
//! engine.start_warmup();
//! for tap in 0..8 {
//!     engine.on_tap(tap * 600);
//! }
//!
//! // Two taps a full second apart is 60 BPM
//! engine.on_tap(10_000);
//! engine.on_tap(11_000);
//!
//! assert_eq!(engine.state().mode, Mode::Result);
//! assert_eq!(engine.state().outcome, Some(Outcome::Failure));
//! ```

use strum::Display;
use tracing::{debug, info};

use crate::config::Configuration;
use crate::estimator;
use crate::media::{MediaController, NoMedia};
use crate::notification::{Notification, SubscriptionId, Subscribers};
use crate::recorder::TapLog;
use crate::summary::{Summary, summarize};
use crate::tolerance::{self, Band, Classification};
use crate::{Bpm, Millis, STANDARD_BPM};

/// The phase a game is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Waiting for the player to begin
    #[default]
    Start,
    /// Calibrating the player's tempo
    Warmup,
    /// Scored play
    Game,
    /// The game has ended
    Result,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The media ran out while the player was still within tolerance
    Success,
    /// The tempo left the tolerated range
    Failure,
}

/// What became of a single tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResponse {
    /// The tap was not accepted
    ///
    /// This happens outside of warm-up and game, after the game is over, and for
    /// taps that are not later than the previous one.
    Ignored,
    /// The tap was recorded but did not produce a new reading
    Recorded,
    /// The tap was recorded and produced a new reading
    Reading {
        bpm: Bpm,
        classification: Classification,
    },
}

impl TapResponse {
    /// Returns true if the tap was recorded
    pub const fn is_accepted(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// The complete state of one game session
///
/// A fresh state is in [`Mode::Start`] with empty tap logs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Current phase
    pub mode: Mode,
    /// Taps of the running warm-up, capped at the warm-up count
    pub warmup_taps: TapLog,
    /// Taps of the running game
    pub game_taps: TapLog,
    /// Last computed tempo, or the standard tempo before any reading
    pub current_bpm: Bpm,
    /// Number of taps registered during the game
    pub beat_count: usize,
    /// Set once the game has ended, cleared only by a reset
    pub is_game_over: bool,
    /// How the last game ended
    pub outcome: Option<Outcome>,
    /// Report of the last game
    pub summary: Option<Summary>,
}

impl GameState {
    fn new(config: &Configuration) -> Self {
        Self {
            mode: Mode::Start,
            warmup_taps: TapLog::bounded(config.warmup_count),
            game_taps: TapLog::unbounded(),
            current_bpm: STANDARD_BPM,
            beat_count: 0,
            is_game_over: false,
            outcome: None,
            summary: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Configuration::default())
    }
}

/// Tap-tempo game coordinator and state owner
///
/// Every engine owns its own [`GameState`], so any number of independent sessions
/// can run side by side.
///
/// # Architecture
///
/// - **TapLog**: One bounded log for warm-up, one unbounded log for the game
/// - **Estimator**: Turns the relevant taps into a BPM value
/// - **Tolerance**: Grades that value and decides when a game is lost
/// - **MediaController**: Told to play when a game starts and pause when it ends
/// - **Subscribers**: Receive a [`Notification`] for every state change
///
/// # Thread Safety
///
/// The engine is single-threaded. Each call runs to completion before the next one
/// is handled, and subscribers are invoked synchronously from inside that call.
#[derive(Debug)]
pub struct TempoEngine<M: MediaController = NoMedia> {
    state: GameState,
    config: Configuration,
    media: M,
    subscribers: Subscribers,
}

impl TempoEngine<NoMedia> {
    /// Create an engine that has no media to control
    pub fn without_media() -> Self {
        Self::new(NoMedia)
    }
}

impl Default for TempoEngine<NoMedia> {
    fn default() -> Self {
        Self::without_media()
    }
}

impl<M: MediaController> TempoEngine<M> {
    /// Create a new engine in [`Mode::Start`]
    ///
    /// # Parameters
    ///
    /// * `media` - The playback surface started and paused at game boundaries
    pub fn new(media: M) -> Self {
        let config = Configuration::default();
        Self {
            state: GameState::new(&config),
            config,
            media,
            subscribers: Subscribers::default(),
        }
    }

    /// Configure the engine with custom settings (builder pattern)
    ///
    /// Resets the state so the warm-up log picks up the new capacity.
    ///
    /// ```rust
    /// use beatkeeper::engine::TempoEngine;
    /// use beatkeeper::config::Configuration;
    /// use beatkeeper::Mode;
    ///
    /// let mut engine = TempoEngine::without_media().with_configuration(Configuration {
    ///     warmup_count: 4,
    ///     ..Configuration::default()
    /// });
    ///
    /// engine.start_warmup();
    /// for tap in 0..4 {
    ///     engine.on_tap(tap * 600);
    /// }
    /// assert_eq!(engine.state().mode, Mode::Game);
    /// ```
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config.sanitized();
        self.state = GameState::new(&self.config);
        self
    }

    /// The active configuration
    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// (Re)initialize the game state to [`Mode::Start`]
    ///
    /// Unlike [`reset_game`](Self::reset_game) this never talks to the media.
    pub fn init(&mut self) {
        self.state = GameState::new(&self.config);
        self.publish(Notification::ModeChanged {
            mode: Mode::Start,
            bpm: self.state.current_bpm,
        });
    }

    /// Read-only view of the current state
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// An owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The media controller
    pub const fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the media controller, e.g. to poll it for its end
    pub const fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Register a callback for every state change
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.subscribers.subscribe(Box::new(subscriber))
    }

    /// Remove a callback again
    ///
    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Begin (or restart) the warm-up
    ///
    /// Accepted in [`Mode::Start`] and [`Mode::Warmup`]. A running or finished game
    /// has to be reset first.
    ///
    /// Returns true if the warm-up started.
    pub fn start_warmup(&mut self) -> bool {
        if !matches!(self.state.mode, Mode::Start | Mode::Warmup) {
            debug!(mode = %self.state.mode, "Ignoring warm-up request");
            return false;
        }

        info!(taps = self.config.warmup_count, "Starting warm-up");

        self.state.mode = Mode::Warmup;
        self.state.warmup_taps.clear();
        self.state.game_taps.clear();
        self.state.beat_count = 0;
        self.state.is_game_over = false;
        self.state.outcome = None;
        self.state.summary = None;

        self.publish(Notification::ModeChanged {
            mode: Mode::Warmup,
            bpm: self.state.current_bpm,
        });
        true
    }

    /// Process a tap at `timestamp` milliseconds
    ///
    /// This is the only input of the engine. What a tap does depends on the mode:
    ///
    /// - **Warmup**: Recorded until the warm-up count is reached, which evaluates the
    ///   warm-up and either starts the game or starts the warm-up over.
    /// - **Game**: Recorded and graded over the sliding window. A fatal tempo ends
    ///   the game as a failure.
    /// - **Start / Result**: Ignored.
    ///
    /// Taps that are not later than the previous tap of the running phase are
    /// ignored, and the previous reading is kept.
    pub fn on_tap(&mut self, timestamp: Millis) -> TapResponse {
        let response = match self.state.mode {
            Mode::Warmup => self.warmup_tap(timestamp),
            Mode::Game if !self.state.is_game_over => self.game_tap(timestamp),
            _ => TapResponse::Ignored,
        };

        if !response.is_accepted() {
            debug!(timestamp, mode = %self.state.mode, "Tap ignored");
        }

        response
    }

    /// Signal that the media has played to its end
    ///
    /// During a game this ends the game as a success, whatever the last reading
    /// was. In every other situation it does nothing.
    ///
    /// Returns true if the game ended because of this call.
    pub fn on_media_ended(&mut self) -> bool {
        if self.state.mode != Mode::Game || self.state.is_game_over {
            debug!(mode = %self.state.mode, "Ignoring end of media");
            return false;
        }

        self.game_over(Outcome::Success);
        true
    }

    /// Return to [`Mode::Start`] from any mode
    ///
    /// Clears both tap logs and restores the standard tempo. Leaving a running game
    /// pauses the media.
    pub fn reset_game(&mut self) {
        let was_playing = self.state.mode == Mode::Game && !self.state.is_game_over;

        info!(from = %self.state.mode, "Resetting game");
        self.state = GameState::new(&self.config);

        if was_playing {
            self.media.pause();
        }

        self.publish(Notification::ModeChanged {
            mode: Mode::Start,
            bpm: self.state.current_bpm,
        });
    }
}

// Tap handling
impl<M: MediaController> TempoEngine<M> {
    fn warmup_tap(&mut self, timestamp: Millis) -> TapResponse {
        if is_out_of_order(&self.state.warmup_taps, timestamp)
            || !self.state.warmup_taps.record(timestamp)
        {
            return TapResponse::Ignored;
        }

        let count = self.state.warmup_taps.len();
        debug!(timestamp, count, "Warm-up tap");

        self.publish(Notification::WarmupProgress {
            count,
            total: self.config.warmup_count,
        });

        // Live feedback follows the latest interval, not the running average
        let response = match estimator::latest(self.state.warmup_taps.as_slice()) {
            Some(bpm) => {
                let classification = tolerance::classify_warmup(bpm);
                self.state.current_bpm = bpm;
                self.publish(Notification::Feedback {
                    mode: Mode::Warmup,
                    bpm,
                    classification,
                    beat_count: None,
                });
                TapResponse::Reading {
                    bpm,
                    classification,
                }
            }
            None => TapResponse::Recorded,
        };

        if self.state.warmup_taps.is_full() {
            self.finish_warmup();
        }

        response
    }

    fn finish_warmup(&mut self) {
        let average = estimator::estimate(self.state.warmup_taps.as_slice(), None);

        if let Some(bpm) = average {
            self.state.current_bpm = bpm;
        }

        match average {
            Some(bpm) if tolerance::band(bpm) == Band::OnTarget => {
                info!(bpm, "Warm-up passed");
                self.start_game();
            }
            _ => {
                info!(?average, "Warm-up off target, starting over");
                self.state.warmup_taps.clear();
                self.publish(Notification::WarmupRetry { bpm: average });
            }
        }
    }

    fn start_game(&mut self) {
        self.state.mode = Mode::Game;
        self.state.game_taps.clear();
        self.state.beat_count = 0;
        self.state.is_game_over = false;

        info!(bpm = self.state.current_bpm, "Starting game");
        self.media.play();

        self.publish(Notification::ModeChanged {
            mode: Mode::Game,
            bpm: self.state.current_bpm,
        });
    }

    fn game_tap(&mut self, timestamp: Millis) -> TapResponse {
        if is_out_of_order(&self.state.game_taps, timestamp) {
            return TapResponse::Ignored;
        }

        self.state.game_taps.record(timestamp);
        self.state.beat_count = self.state.game_taps.len();
        debug!(timestamp, beat = self.state.beat_count, "Game tap");

        let reading = estimator::estimate(
            self.state.game_taps.as_slice(),
            Some(self.config.game_window),
        );

        let Some(bpm) = reading else {
            // First beat: nothing to measure yet, repeat the warm-up tempo
            self.publish(Notification::Feedback {
                mode: Mode::Game,
                bpm: self.state.current_bpm,
                classification: tolerance::classify(self.state.current_bpm),
                beat_count: Some(self.state.beat_count),
            });
            return TapResponse::Recorded;
        };

        let classification = tolerance::classify(bpm);
        self.state.current_bpm = bpm;
        self.publish(Notification::Feedback {
            mode: Mode::Game,
            bpm,
            classification,
            beat_count: Some(self.state.beat_count),
        });

        if classification.is_fatal() {
            info!(bpm, band = %classification.band, "Tempo out of range");
            self.game_over(Outcome::Failure);
        }

        TapResponse::Reading {
            bpm,
            classification,
        }
    }

    fn game_over(&mut self, outcome: Outcome) {
        let summary = summarize(self.state.game_taps.as_slice());

        self.state.is_game_over = true;
        self.state.mode = Mode::Result;
        self.state.outcome = Some(outcome);
        self.state.summary = Some(summary);

        info!(
            %outcome,
            average_bpm = summary.average_bpm,
            taps = summary.total_taps,
            "Game over"
        );
        self.media.pause();

        self.publish(Notification::ModeChanged {
            mode: Mode::Result,
            bpm: self.state.current_bpm,
        });
        self.publish(Notification::GameOver { outcome, summary });
    }

    fn publish(&mut self, notification: Notification) {
        self.subscribers.publish(&notification);
    }
}

fn is_out_of_order(log: &TapLog, timestamp: Millis) -> bool {
    log.last().is_some_and(|last| timestamp <= last)
}
