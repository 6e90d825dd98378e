use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::cli::Cli;
use crate::config::{Config, validate_rate};
use crate::error::Error;
use crate::player::SimulatedPlayer;

mod app;
mod cli;
mod config;
mod error;
mod logging;
mod page;
mod player;
mod utils;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::get(cli.config)?;

    if cli.list_tracks {
        for track in &config.settings.tracks {
            println!(
                "{:<20} {} ({})",
                track.id,
                track.title,
                utils::clock_time(track.duration())
            );
        }
        return Ok(());
    }

    if cli.dump_config {
        print!("{}", toml::to_string_pretty(&config.settings)?);
        return Ok(());
    }

    let log_path = logging::init(cli.verbose, cli.log_file.as_deref())?;

    let rate = validate_rate(cli.rate.unwrap_or(config.settings.playback_rate))?;
    let track = config.track(cli.track.as_deref())?.clone();
    info!(log = %log_path.display(), track = %track.id, rate, "Starting tapcoach");

    let player = SimulatedPlayer::new(track, rate);
    App::new(config.settings, player).run()?;

    Ok(())
}
