use chrono::{DateTime, Utc};
use dash_mpd::{SegmentTemplate, MPD};
use regex::Regex;
use std::sync::LazyLock;

use super::duration::iso8601_to_seconds;
use crate::{
    error::ManifestError,
    window::{epoch_seconds, millis_to_delta},
    TimeWindow,
};

static MPD_START_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:[A-Za-z_][\w.-]*:)?MPD\b[^>]*>").unwrap());
static TIME_SHIFT_BUFFER_DEPTH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\btimeShiftBufferDepth\s*=\s*["']([^"']*)["']"#).unwrap()
});

/// Derives the live window of a DASH presentation.
///
/// With `MPD@timeShiftBufferDepth` the window slides: it ends one segment
/// before `reference` and spans the buffer depth. Without it the window grows
/// from `MPD@availabilityStartTime` up to one segment before `reference`.
pub fn parse_dash(document: &str, reference: DateTime<Utc>) -> Result<TimeWindow, ManifestError> {
    let mpd = dash_mpd::parse(document).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse MPD");
        ManifestError::DashMalformed
    })?;

    let Some(segment_template) = first_segment_template(&mpd) else {
        tracing::warn!("No SegmentTemplate found in MPD");
        return Err(ManifestError::DashMalformed);
    };

    // The duration/timescale ratio is the same for audio and video, so any template will do.
    let one_segment_ms = match (segment_template.duration, segment_template.timescale) {
        (Some(duration), Some(timescale)) => 1000. * duration as f64 / timescale as f64,
        _ => f64::NAN,
    };

    let Some(availability_start_time) = mpd.availabilityStartTime else {
        tracing::warn!("MPD@availabilityStartTime is missing");
        return Err(ManifestError::DashAttributes);
    };
    if !one_segment_ms.is_finite() || one_segment_ms == 0. {
        tracing::warn!(one_segment_ms, "Invalid SegmentTemplate duration or timescale");
        return Err(ManifestError::DashAttributes);
    }

    let window_end_time = reference - millis_to_delta(one_segment_ms);
    let window = match time_shift_buffer_depth(document) {
        Some(depth) => {
            let window_start_time = window_end_time - millis_to_delta(depth * 1000.);
            TimeWindow::new(
                window_start_time,
                window_end_time,
                epoch_seconds(window_start_time),
            )
        }
        None => TimeWindow::new(availability_start_time, window_end_time, 0.),
    };

    if window.window_end_time() <= window.window_start_time() {
        tracing::warn!(
            start = %window.window_start_time(),
            end = %window.window_end_time(),
            "MPD availability starts after the reference time"
        );
        return Err(ManifestError::DashAttributes);
    }

    tracing::debug!(
        start = %window.window_start_time(),
        end = %window.window_end_time(),
        time_correction = window.time_correction(),
        "DASH window resolved"
    );
    Ok(window)
}

fn first_segment_template(mpd: &MPD) -> Option<&SegmentTemplate> {
    mpd.periods.iter().find_map(|period| {
        period.SegmentTemplate.as_ref().or_else(|| {
            period.adaptations.iter().find_map(|adaptation| {
                adaptation.SegmentTemplate.as_ref().or_else(|| {
                    adaptation
                        .representations
                        .iter()
                        .find_map(|representation| representation.SegmentTemplate.as_ref())
                })
            })
        })
    })
}

/// `MPD@timeShiftBufferDepth` in seconds, if it describes a usable window.
///
/// dash-mpd folds day designators into the parsed duration, so the raw
/// attribute is read from the `MPD` start tag instead.
fn time_shift_buffer_depth(document: &str) -> Option<f64> {
    let start_tag = MPD_START_TAG_REGEX.find(document)?;
    let caps = TIME_SHIFT_BUFFER_DEPTH_REGEX.captures(start_tag.as_str())?;
    iso8601_to_seconds(caps.get(1)?.as_str()).filter(|depth| *depth > 0.)
}
