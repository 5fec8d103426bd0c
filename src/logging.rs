//! Log setup
//!
//! Stdout carries the status line and nothing else, so logs go to stderr.
//! Quiet by default; set `RUST_LOG=tmux_aqi=debug` to trace cache decisions.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            )
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .finish(),
    )?;
    Ok(())
}
