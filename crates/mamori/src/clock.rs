use chrono::{DateTime, Utc};

use crate::window::delta_to_seconds;

/// Source of wall-clock time.
pub trait WallClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Playback position kept for engines that cannot report their own.
///
/// The position only moves when the clock is re-anchored: time spent
/// playing since the previous anchor is added, time spent in any other state
/// is not.
#[derive(Debug, Clone, Default)]
pub struct ElapsedClock {
    anchor_wall_time: Option<DateTime<Utc>>,
    current_time_at_anchor: f64,
    is_running: bool,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the origin to `now` at position `current_time`.
    pub fn set(&mut self, current_time: f64, now: DateTime<Utc>) {
        self.current_time_at_anchor = current_time;
        self.anchor_wall_time = Some(now);
    }

    /// Accounts for the time played since the last anchor and starts a new
    /// interval in which the player is (or is not) `playing`.
    pub fn reanchor(&mut self, now: DateTime<Utc>, playing: bool) {
        if let (true, Some(anchor)) = (self.is_running, self.anchor_wall_time) {
            self.current_time_at_anchor += delta_to_seconds(now - anchor);
        }
        self.anchor_wall_time = Some(now);
        self.is_running = playing;
    }

    pub fn current_time(&self) -> f64 {
        self.current_time_at_anchor
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }
}
