use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use parking_lot::Mutex;

use crate::{MediaType, PlayerState, SeekableRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEventKind {
    Stopped,
    Buffering,
    Playing,
    Paused,
    Complete,
    Error,
    TimeUpdate,
    SeekAttempted,
    SeekFinished,
    Status,
}

/// Event emitted by a media engine, carrying a snapshot of its telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEvent {
    pub kind: PlayerEventKind,
    pub state: PlayerState,
    pub current_time: Option<f64>,
    pub seekable_range: Option<SeekableRange>,
    pub duration: Option<f64>,
}

impl PlayerEvent {
    pub fn new(kind: PlayerEventKind, state: PlayerState) -> Self {
        Self {
            kind,
            state,
            current_time: None,
            seekable_range: None,
            duration: None,
        }
    }

    pub fn with_current_time(mut self, current_time: f64) -> Self {
        self.current_time = Some(current_time);
        self
    }

    pub fn with_seekable_range(mut self, seekable_range: SeekableRange) -> Self {
        self.seekable_range = Some(seekable_range);
        self
    }

    /// Whether anything other than a pause happened.
    pub fn is_unpaused(&self) -> bool {
        self.state != PlayerState::Paused
    }
}

pub type EventCallback = Arc<dyn Fn(&PlayerEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

#[derive(Debug, Clone, Default)]
pub struct MediaOptions {
    pub disable_sentinels: bool,
    pub disable_seek_sentinel: bool,
}

/// Contract of the platform media engine the live players decorate.
///
/// Methods take `&self`: adapters are handles onto an engine that owns its own
/// state, and timers need to reach them from spawned tasks.
pub trait MediaPlayer: Send + Sync {
    fn initialise_media(
        &self,
        media_type: MediaType,
        url: &str,
        mime_type: &str,
        source_container: &str,
        opts: &MediaOptions,
    );

    fn begin_playback(&self);

    fn begin_playback_from(&self, seconds: f64);

    fn play_from(&self, seconds: f64);

    fn pause(&self);

    fn resume(&self);

    fn stop(&self);

    fn reset(&self);

    fn state(&self) -> PlayerState;

    fn source(&self) -> Option<String>;

    fn mime_type(&self) -> Option<String>;

    fn current_time(&self) -> Option<f64>;

    fn seekable_range(&self) -> Option<SeekableRange>;

    fn duration(&self) -> Option<f64>;

    fn add_event_callback(&self, callback: EventCallback) -> CallbackId;

    fn remove_event_callback(&self, id: CallbackId);
}

/// Callback registry for [`MediaPlayer`] adapters.
///
/// Callbacks may add or remove callbacks while being dispatched; changes apply
/// from the next event on.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(CallbackId, EventCallback)>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, callback: EventCallback) -> CallbackId {
        let id = CallbackId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.lock().push((id, callback));
        id
    }

    /// Returns whether the callback was registered.
    pub fn remove(&self, id: CallbackId) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(registered, _)| *registered != id);
        callbacks.len() != before
    }

    pub fn dispatch(&self, event: &PlayerEvent) {
        let callbacks: Vec<EventCallback> = self
            .callbacks
            .lock()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
