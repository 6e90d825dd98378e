use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A backing track the player taps along to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Length of the track at normal speed
    pub duration_secs: u64,
}

impl Track {
    pub fn new(id: &str, title: &str, duration_secs: u64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            duration_secs,
        }
    }

    pub const fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Songs that sit close to 100 BPM
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("anpanman", "Anpanman's March", 70),
        Track::new("stayin-alive", "Stayin' Alive", 249),
        Track::new("cherry", "Cherry", 261),
        Track::new("sekai-ni-hitotsu", "Sekai ni Hitotsu Dake no Hana", 277),
        Track::new("chijou-no-hoshi", "Chijou no Hoshi", 301),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tracks_have_unique_ids() {
        let tracks = default_tracks();
        for (idx, track) in tracks.iter().enumerate() {
            assert!(
                tracks[idx + 1..].iter().all(|other| other.id != track.id),
                "duplicate id {}",
                track.id
            );
            assert!(track.duration_secs > 0);
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(
            Track::new("x", "X", 70).duration(),
            Duration::from_secs(70)
        );
    }
}
