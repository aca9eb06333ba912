use std::path::PathBuf;

use clap::Parser;
use clap_handler::handler;
use mamori::{failover::FailoverInput, PlaybackConfig, TransferFormat};

/// Decide whether a failure at the given position would switch sources.
#[derive(Parser, Clone)]
#[clap(name = "failover")]
pub struct FailoverCommand {
    /// Playback config in TOML
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Sources left, including the one playing
    #[clap(short, long)]
    remaining: usize,

    /// Asset duration in seconds
    #[clap(long)]
    duration: Option<f64>,

    /// Playback position in seconds
    #[clap(long)]
    current_time: Option<f64>,
}

#[handler(FailoverCommand)]
async fn handle_failover(this: FailoverCommand) -> anyhow::Result<()> {
    let config = match &this.config {
        Some(path) => PlaybackConfig::load(path)?,
        None => PlaybackConfig::default(),
    };

    let input = FailoverInput {
        remaining_source_count: this.remaining,
        duration: this.duration,
        current_time: this.current_time,
        live_support: Some(config.live_support),
        window_type: config.window_type,
        transfer_format: config.transfer_format.unwrap_or(TransferFormat::Dash),
    };
    tracing::debug!(?input, "Evaluating failover");

    println!("{}", input.should_failover());
    Ok(())
}
