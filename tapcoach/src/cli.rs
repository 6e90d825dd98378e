use std::path::PathBuf;

use clap::Parser;

/// Keep a steady 100 BPM while your favourite songs play
#[derive(Debug, Parser)]
#[command(name = "tapcoach", version, about)]
pub struct Cli {
    /// Directory holding settings.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Id of the backing track to play
    #[arg(short, long)]
    pub track: Option<String>,

    /// Playback rate of the backing track, overrides the config
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Print the configured tracks and exit
    #[arg(long)]
    pub list_tracks: bool,

    /// Print the effective configuration as toml and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Write the log to this file instead of the data directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
