use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use theme::Theme;
pub use track::Track;

pub mod theme;
pub mod track;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// The key the player taps along with
    pub tap_key: char,
    /// Speed of the backing track, 1.0 is normal speed
    pub playback_rate: f64,
    pub theme: Theme,
    pub tracks: Vec<Track>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tap_key: ' ',
            playback_rate: 1.0,
            theme: Theme::default(),
            tracks: track::default_tracks(),
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("No tracks configured. Add at least one [[tracks]] entry to settings.toml")]
    #[from(skip)]
    NoTracks,

    #[error("Unknown track '{0}'. Use `--list-tracks` to see the available tracks")]
    #[from(skip)]
    UnknownTrack(String),

    #[error("Invalid playback rate {0}: must be above 0 and at most 16")]
    #[from(skip)]
    InvalidRate(f64),
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "TapCoach", "TapCoach")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let mut settings_toml = config_dir;
        settings_toml.push("settings.toml");

        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        settings = settings.merge(Env::prefixed("TAPCOACH_").ignore(&["log"]));

        let settings: Settings = settings.extract().map_err(Box::new)?;

        if settings.tracks.is_empty() {
            return Err(ConfigError::NoTracks);
        }
        validate_rate(settings.playback_rate)?;

        Ok(Self { settings })
    }

    /// Look up a track by id, or the first configured track if no id is given
    pub fn track(&self, id: Option<&str>) -> Result<&Track, ConfigError> {
        match id {
            Some(id) => self
                .settings
                .tracks
                .iter()
                .find(|track| track.id == id)
                .ok_or_else(|| ConfigError::UnknownTrack(id.to_string())),
            None => self.settings.tracks.first().ok_or(ConfigError::NoTracks),
        }
    }
}

/// Fastest playback rate accepted
pub const MAX_PLAYBACK_RATE: f64 = 16.0;

pub fn validate_rate(rate: f64) -> Result<f64, ConfigError> {
    if rate > 0.0 && rate <= MAX_PLAYBACK_RATE {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidRate(rate))
    }
}
