use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "TAPCOACH_LOG";

const LOG_FILE_NAME: &str = "tapcoach.log";

/// Default filter for the number of `-v` flags
pub const fn filter_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "TapCoach", "TapCoach")
        .map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Sends tracing output to a file
///
/// The terminal belongs to the TUI, so nothing is ever logged to stdout.
pub fn init(verbosity: u8, path: Option<&Path>) -> Result<PathBuf, Error> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(default_log_path)
        .ok_or_else(|| Error::Logging("no data directory for the log file".to_string()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(filter_for(verbosity))),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| Error::Logging(error.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for(0), "warn");
        assert_eq!(filter_for(1), "info");
        assert_eq!(filter_for(2), "debug");
        assert_eq!(filter_for(3), "trace");
        assert_eq!(filter_for(u8::MAX), "trace");
    }
}
