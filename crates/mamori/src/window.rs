use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The currently available time range of a stream, derived from one manifest fetch.
///
/// A refreshed manifest yields a new `TimeWindow`; instances are never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    window_start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    window_end_time: DateTime<Utc>,
    /// Seconds to add to a playback position to get epoch seconds.
    /// Zero unless the window slides.
    time_correction: f64,
}

impl TimeWindow {
    pub fn new(
        window_start_time: DateTime<Utc>,
        window_end_time: DateTime<Utc>,
        time_correction: f64,
    ) -> Self {
        Self {
            window_start_time,
            window_end_time,
            time_correction,
        }
    }

    pub fn window_start_time(&self) -> DateTime<Utc> {
        self.window_start_time
    }

    pub fn window_end_time(&self) -> DateTime<Utc> {
        self.window_end_time
    }

    pub fn time_correction(&self) -> f64 {
        self.time_correction
    }

    pub fn start_ms(&self) -> i64 {
        self.window_start_time.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.window_end_time.timestamp_millis()
    }

    /// Length of the window in (fractional) seconds.
    pub fn length_seconds(&self) -> f64 {
        delta_to_seconds(self.window_end_time - self.window_start_time)
    }

    pub fn is_sliding(&self) -> bool {
        self.time_correction != 0.
    }

    pub fn playback_time_to_epoch_ms(&self, seconds: f64) -> i64 {
        self.start_ms() + (seconds * 1000.).round() as i64
    }

    /// Whole seconds elapsed since the window start at `epoch_ms`.
    pub fn epoch_ms_to_playback_time(&self, epoch_ms: i64) -> f64 {
        ((epoch_ms - self.start_ms()) as f64 / 1000.).floor()
    }
}

pub(crate) fn millis_to_delta(milliseconds: f64) -> TimeDelta {
    TimeDelta::microseconds((milliseconds * 1000.).round() as i64)
}

pub(crate) fn delta_to_seconds(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.,
        None => delta.num_milliseconds() as f64 / 1000.,
    }
}

pub(crate) fn epoch_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_micros() as f64 / 1_000_000.
}
