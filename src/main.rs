//! tmux-aqi - Air quality index in the tmux status bar
//!
//! Prints a single colorized status segment for the nearest city reported by
//! the AirVisual API, reusing the last reading while it is fresh. Intended to
//! be called from `status-right` via `#(tmux-aqi)`.

use std::process::ExitCode;

use clap::Parser;

use tmux_aqi::app::App;
use tmux_aqi::cli::Cli;
use tmux_aqi::config::Settings;
use tmux_aqi::logging::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("tmux-aqi: failed to set up logging: {e}");
    }

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("tmux-aqi: {e}");
            return ExitCode::FAILURE;
        }
    };

    match App::new(&settings).run().await {
        Ok(outcome) => {
            println!("{}", outcome.line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("tmux-aqi: {e}");
            ExitCode::FAILURE
        }
    }
}
