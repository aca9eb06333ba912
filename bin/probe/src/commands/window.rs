use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use clap_handler::handler;
use mamori::{manifest, TransferFormat};

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Dash,
    Hls,
}

impl From<FormatArg> for TransferFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Dash => TransferFormat::Dash,
            FormatArg::Hls => TransferFormat::Hls,
        }
    }
}

/// Resolve the live time window of a manifest file.
#[derive(Parser, Clone)]
#[clap(name = "window")]
pub struct WindowCommand {
    /// Manifest format. Detected from the file when omitted.
    #[clap(short, long)]
    format: Option<FormatArg>,

    /// Reference time for DASH manifests, in RFC 3339. Defaults to now.
    #[clap(long)]
    now: Option<DateTime<Utc>>,

    /// Also print the wall-clock time of this playback position, in seconds
    #[clap(long)]
    position: Option<f64>,

    /// Also print the playback position of this wall-clock time, in RFC 3339
    #[clap(long)]
    at: Option<DateTime<Utc>>,

    /// Path to an MPD or a media playlist
    manifest: PathBuf,
}

#[handler(WindowCommand)]
async fn handle_window(this: WindowCommand) -> anyhow::Result<()> {
    let document = tokio::fs::read_to_string(&this.manifest)
        .await
        .with_context(|| format!("failed to read {}", this.manifest.display()))?;

    let format = match this.format {
        Some(format) => format.into(),
        None => TransferFormat::detect(
            &this.manifest.to_string_lossy(),
            None,
            Some(document.as_str()),
        ),
    };
    let now = this.now.unwrap_or_else(Utc::now);
    tracing::info!(?format, %now, "Resolving time window");

    let window = manifest::parse(&document, format, now)?;
    tracing::info!(
        length_seconds = window.length_seconds(),
        sliding = window.is_sliding(),
        "Time window resolved"
    );

    let mut output = serde_json::json!({ "window": window });
    if let Some(position) = this.position {
        output["positionEpochMs"] = window.playback_time_to_epoch_ms(position).into();
    }
    if let Some(at) = this.at {
        output["playbackTime"] = window.epoch_ms_to_playback_time(at.timestamp_millis()).into();
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
