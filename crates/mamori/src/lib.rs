//! Playback resilience for adaptive streaming on constrained devices.
//!
//! ```text
//!  manifest ──parse──► TimeWindow ──┬──► should_failover ◄── telemetry
//!                                   │
//!                                   ▼
//!  MediaPlayer ◄──decorates── LivePositionTracker ──events──► ReadyGate
//!                              (Playable | Restartable | Seekable)
//!                                   │
//!                                   └──pause──► resume::schedule
//! ```
//!
//! Everything here is driven by engine callbacks and tokio timers. Parsing and
//! policy functions are pure and report failures as values.

pub mod clock;
pub mod config;
pub mod error;
pub mod failover;
pub mod live;
pub mod manifest;
pub mod player;
pub mod ready;
pub mod resume;
mod types;
mod window;

pub use clock::{ElapsedClock, SystemClock, WallClock};
pub use config::{PlaybackConfig, PlaybackOverrides};
pub use error::{MamoriError, MamoriResult, ManifestError};
pub use failover::should_failover;
pub use live::{LivePositionTracker, PauseOptions};
pub use player::{CallbackId, EventCallback, EventDispatcher, MediaPlayer, PlayerEvent};
pub use ready::{ReadyGate, TelemetryEvent};
pub use types::*;
pub use window::TimeWindow;
