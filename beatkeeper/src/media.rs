//! # Media Module - Playback Capability
//!
//! The engine asks a media player to start when a game begins and to pause when
//! the game ends. Requests are fire-and-forget: a controller that can not act
//! reports it through its own logging, and the engine's state transition proceeds
//! regardless.
//!
//! The other direction, "the media has ended", is delivered by the owner of the
//! player calling [`TempoEngine::on_media_ended`](crate::engine::TempoEngine::on_media_ended).

/// A playback surface the engine can drive
pub trait MediaController {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);
}

/// A controller for sessions without media
///
/// Every request is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMedia;

impl MediaController for NoMedia {
    fn play(&mut self) {}

    fn pause(&mut self) {}
}

impl<M: MediaController + ?Sized> MediaController for Box<M> {
    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }
}
