use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop the app before or while it runs
#[derive(Debug, From, Error)]
pub enum Error {
    #[error("{0}")]
    Config(ConfigError),

    #[error("Terminal error: {0}")]
    Io(std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to set up logging: {0}")]
    #[from(skip)]
    Logging(String),
}
