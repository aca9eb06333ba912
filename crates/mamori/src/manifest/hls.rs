use chrono::{TimeDelta, Utc};
use m3u8_rs::MediaPlaylist;
use regex::Regex;
use std::sync::LazyLock;

use crate::{error::ManifestError, TimeWindow};

static EXTINF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#EXTINF:\s*([0-9]+(?:\.[0-9]*)?)").unwrap());

/// Derives the window of an HLS media playlist.
///
/// The window starts at the first `#EXT-X-PROGRAM-DATE-TIME` and lasts for the
/// sum of every `#EXTINF`, floored to whole seconds.
pub fn parse_hls(document: &str) -> Result<TimeWindow, ManifestError> {
    let playlist = m3u8_rs::parse_media_playlist_res(document.as_bytes()).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse media playlist");
        ManifestError::Hls
    })?;

    let Some(window_start_time) = program_date_time(&playlist) else {
        tracing::warn!("No EXT-X-PROGRAM-DATE-TIME in media playlist");
        return Err(ManifestError::Hls);
    };

    // Floor the total rather than each segment.
    let duration = extinf_seconds(document).sum::<f64>().floor();
    if duration <= 0. {
        tracing::warn!(segments = playlist.segments.len(), "Media playlist has no duration");
        return Err(ManifestError::Hls);
    }

    let window_end_time = window_start_time + TimeDelta::seconds(duration as i64);
    tracing::debug!(start = %window_start_time, end = %window_end_time, "HLS window resolved");

    Ok(TimeWindow::new(window_start_time, window_end_time, 0.))
}

fn program_date_time(playlist: &MediaPlaylist) -> Option<chrono::DateTime<Utc>> {
    playlist
        .segments
        .iter()
        .find_map(|segment| segment.program_date_time)
        .map(|date| date.with_timezone(&Utc))
}

/// Every `#EXTINF` duration at full precision.
///
/// m3u8-rs keeps durations as `f32`, whose error is enough to pull a sum of
/// typical durations just below a whole second.
fn extinf_seconds(document: &str) -> impl Iterator<Item = f64> + '_ {
    EXTINF_REGEX
        .captures_iter(document)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
}
