//! SlideDeck - image selection and slideshow player
//!
//! Main entry point for the console frontend.

mod app;

use anyhow::Result;
use std::path::PathBuf;

const HELP: &str = "\
slidedeck - image selection and slideshow player

USAGE:
  slidedeck [OPTIONS] [IMAGE_PATHS]...

OPTIONS:
  -i, --interval <MS>  Default slideshow delay in milliseconds
  -h, --help           Print this help

Image paths given on the command line are loaded at startup; type `help`
at the prompt for the interactive commands.
";

/// Options taken from the command line.
pub struct CliOptions {
    pub interval_ms: Option<u64>,
    pub paths: Vec<PathBuf>,
}

fn parse_cli() -> Result<CliOptions, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let interval_ms = args.opt_value_from_str(["-i", "--interval"])?;
    let paths = args.finish().into_iter().map(PathBuf::from).collect();

    Ok(CliOptions { interval_ms, paths })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook first
    let _log_guard = deck_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = deck_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("SlideDeck starting...");

    let options = parse_cli()?;

    // Load configuration
    let config = deck_core::DeckConfig::load().unwrap_or_default();

    // Run the application
    app::run(options, config).await
}
