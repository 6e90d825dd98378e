//! A stand-in for the video player
//!
//! Nothing is decoded or shown. The player only keeps time so the engine gets
//! its end-of-media signal when the backing track would have finished.

use std::time::{Duration, Instant};

use beatkeeper::media::MediaController;
use tracing::{debug, info};

use crate::config::Track;

#[derive(Debug)]
pub struct SimulatedPlayer {
    track: Track,
    rate: f64,
    /// Track time played before the latest resume
    played: Duration,
    resumed_at: Option<Instant>,
    ended: bool,
    end_reported: bool,
}

impl SimulatedPlayer {
    pub const fn new(track: Track, rate: f64) -> Self {
        Self {
            track,
            rate,
            played: Duration::ZERO,
            resumed_at: None,
            ended: false,
            end_reported: false,
        }
    }

    pub const fn track(&self) -> &Track {
        &self.track
    }

    pub const fn rate(&self) -> f64 {
        self.rate
    }

    pub const fn is_playing(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Position in the track, clamped to its length
    pub fn position(&self) -> Duration {
        self.position_at(Instant::now())
    }

    fn position_at(&self, now: Instant) -> Duration {
        let running = self.resumed_at.map_or(Duration::ZERO, |resumed| {
            self.scaled(now.saturating_duration_since(resumed))
        });
        self.played
            .saturating_add(running)
            .min(self.track.duration())
    }

    /// Converts wall-clock time into track time, saturating at the track length
    fn scaled(&self, elapsed: Duration) -> Duration {
        Duration::try_from_secs_f64(elapsed.as_secs_f64() * self.rate)
            .unwrap_or(Duration::MAX)
            .min(self.track.duration())
    }

    /// Fraction of the track played, between 0.0 - 1.0
    pub fn progress(&self) -> f64 {
        let total = self.track.duration().as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        (self.position().as_secs_f64() / total).clamp(0.0, 1.0)
    }

    /// Returns true exactly once, when the track has run out
    pub fn poll_ended(&mut self) -> bool {
        self.poll_ended_at(Instant::now())
    }

    fn poll_ended_at(&mut self, now: Instant) -> bool {
        if self.is_playing() && self.position_at(now) >= self.track.duration() {
            self.played = self.track.duration();
            self.resumed_at = None;
            self.ended = true;
            info!(track = %self.track.id, "Track ended");
        }

        if self.ended && !self.end_reported {
            self.end_reported = true;
            return true;
        }
        false
    }
}

impl MediaController for SimulatedPlayer {
    /// Starts the track from the top
    fn play(&mut self) {
        self.played = Duration::ZERO;
        self.resumed_at = Some(Instant::now());
        self.ended = false;
        self.end_reported = false;
        info!(track = %self.track.id, rate = self.rate, "Playing");
    }

    fn pause(&mut self) {
        if let Some(resumed) = self.resumed_at.take() {
            self.played = self
                .played
                .saturating_add(self.scaled(resumed.elapsed()))
                .min(self.track.duration());
        }
        debug!(track = %self.track.id, position = ?self.played, "Paused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(secs: u64, rate: f64) -> SimulatedPlayer {
        SimulatedPlayer::new(Track::new("test", "Test", secs), rate)
    }

    #[test]
    fn test_idle_player_never_ends() {
        let mut player = player(1, 1.0);
        assert!(!player.is_playing());
        assert_eq!(player.position(), Duration::ZERO);
        assert!(!player.poll_ended_at(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn test_end_is_reported_once() {
        let mut player = player(2, 1.0);
        player.play();
        let start = Instant::now();

        assert!(!player.poll_ended_at(start));
        let later = start + Duration::from_secs(5);
        assert!(player.poll_ended_at(later));
        assert!(!player.poll_ended_at(later));
        assert!(!player.is_playing());
        assert_eq!(player.position(), Duration::from_secs(2));
    }

    #[test]
    fn test_rate_speeds_up_the_track() {
        let mut player = player(10, 2.0);
        player.play();
        let later = Instant::now() + Duration::from_secs(6);
        assert!(player.poll_ended_at(later));
    }

    #[test]
    fn test_huge_rate_saturates() {
        let mut fast = player(10, 1e300);
        fast.play();
        let later = Instant::now() + Duration::from_millis(2);
        assert!(fast.poll_ended_at(later));
        assert_eq!(fast.position(), Duration::from_secs(10));

        let mut fastest = player(10, f64::MAX);
        fastest.play();
        fastest.pause();
        assert!(fastest.position() <= Duration::from_secs(10));
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let mut player = player(60, 1.0);
        player.play();
        player.pause();
        assert!(!player.is_playing());
        let frozen = player.position();
        assert!(!player.poll_ended_at(Instant::now() + Duration::from_secs(120)));
        assert_eq!(player.position(), frozen);
    }

    #[test]
    fn test_play_restarts() {
        let mut player = player(1, 1.0);
        player.play();
        assert!(player.poll_ended_at(Instant::now() + Duration::from_secs(3)));
        player.play();
        assert!(player.is_playing());
        assert!(player.position() < Duration::from_secs(1));
    }
}
