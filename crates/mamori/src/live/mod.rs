//! # Live players
//!
//! Devices differ in how much they can do with a live stream, so the media
//! engine is wrapped in one of three players chosen by [`LiveSupport`]:
//!
//! | Support       | Position                          | Pause                         |
//! |---------------|-----------------------------------|-------------------------------|
//! | `Playable`    | not available                     | not available                 |
//! | `Restartable` | kept by an internal elapsed clock | auto resumes near window start |
//! | `Seekable`    | reported by the engine            | auto resumes on sliding windows |
//!
//! Operations a tier cannot support are simply missing from its player. The
//! engine reports state transitions; the players only react to them.

mod playable;
mod restartable;
mod seekable;

pub use playable::PlayableLivePlayer;
pub use restartable::RestartableLivePlayer;
pub use seekable::SeekableLivePlayer;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    clock::WallClock,
    config::{PlaybackConfig, PlaybackOverrides},
    player::{CallbackId, EventCallback, MediaOptions, MediaPlayer, PlayerEvent},
    resume::{self, CancelPredicate, PendingResume},
    LiveSupport, MamoriError, MamoriResult, MediaType, PlayerState, SeekableRange, TimeWindow,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct PauseOptions {
    pub disable_auto_resume: bool,
}

pub enum LivePositionTracker<P: MediaPlayer + 'static> {
    Playable(PlayableLivePlayer<P>),
    Restartable(RestartableLivePlayer<P>),
    Seekable(SeekableLivePlayer<P>),
}

macro_rules! delegate {
    ($self:ident, $player:ident => $expr:expr) => {
        match $self {
            LivePositionTracker::Playable($player) => $expr,
            LivePositionTracker::Restartable($player) => $expr,
            LivePositionTracker::Seekable($player) => $expr,
        }
    };
}

impl<P: MediaPlayer + 'static> LivePositionTracker<P> {
    /// Wraps `player` in the live player matching `live_support`.
    ///
    /// `time_window` and `clock` are only used by restartable players.
    pub fn new(
        live_support: LiveSupport,
        player: Arc<P>,
        config: &PlaybackConfig,
        time_window: TimeWindow,
        clock: Arc<dyn WallClock>,
    ) -> MamoriResult<Self> {
        let tracker = match live_support {
            LiveSupport::None => return Err(MamoriError::LiveUnsupported(live_support)),
            LiveSupport::Playable => Self::Playable(PlayableLivePlayer::new(player, config)),
            LiveSupport::Restartable => Self::Restartable(RestartableLivePlayer::new(
                player,
                config,
                time_window,
                clock,
            )),
            LiveSupport::Seekable => Self::Seekable(SeekableLivePlayer::new(player, config)),
        };
        tracing::info!(?live_support, window_type = ?config.window_type, "Live player created");
        Ok(tracker)
    }

    pub fn live_support(&self) -> LiveSupport {
        delegate!(self, player => player.live_support())
    }

    pub fn initialise_media(
        &self,
        media_type: MediaType,
        url: &str,
        mime_type: &str,
        source_container: &str,
        opts: &MediaOptions,
    ) {
        delegate!(self, player => player.initialise_media(media_type, url, mime_type, source_container, opts))
    }

    pub fn begin_playback(&self) {
        delegate!(self, player => player.begin_playback())
    }

    pub fn stop(&self) {
        delegate!(self, player => player.stop())
    }

    pub fn reset(&self) {
        delegate!(self, player => player.reset())
    }

    pub fn state(&self) -> PlayerState {
        delegate!(self, player => player.state())
    }

    pub fn source(&self) -> Option<String> {
        delegate!(self, player => player.source())
    }

    pub fn mime_type(&self) -> Option<String> {
        delegate!(self, player => player.mime_type())
    }

    pub fn add_event_callback(&self, callback: EventCallback) -> CallbackId {
        delegate!(self, player => player.add_event_callback(callback))
    }

    pub fn remove_event_callback(&self, id: CallbackId) {
        delegate!(self, player => player.remove_event_callback(id))
    }
}

fn initialise_live_media<P: MediaPlayer>(
    player: &P,
    media_type: MediaType,
    url: &str,
    mime_type: &str,
    source_container: &str,
    opts: &MediaOptions,
) {
    player.initialise_media(media_type.to_live(), url, mime_type, source_container, opts);
}

fn begin_live_playback<P: MediaPlayer>(player: &P, overrides: &PlaybackOverrides) {
    if overrides.force_begin_playback_to_end_of_window {
        player.begin_playback_from(f64::INFINITY);
    } else {
        player.begin_playback();
    }
}

/// The auto resume a live player has outstanding. At most one per player.
#[derive(Default)]
struct AutoResumeSlot(Mutex<Option<PendingResume>>);

impl AutoResumeSlot {
    fn arm<P: MediaPlayer + 'static>(
        &self,
        player: &Arc<P>,
        current_time: f64,
        seekable_range: SeekableRange,
    ) {
        let previous = self.0.lock().take();
        if previous.is_some_and(|previous| previous.cancel()) {
            tracing::warn!("Auto resume armed while another one was pending, replacing it");
        }

        let (add, remove, resume) = (player.clone(), player.clone(), player.clone());
        let is_cancelling: CancelPredicate = Box::new(PlayerEvent::is_unpaused);
        let pending = resume::schedule(
            current_time,
            seekable_range,
            move |callback| add.add_event_callback(callback),
            move |id| remove.remove_event_callback(id),
            Some(is_cancelling),
            move || resume.resume(),
        );

        let raced = self.0.lock().replace(pending);
        if let Some(raced) = raced {
            raced.cancel();
        }
    }

    fn cancel(&self) {
        let pending = self.0.lock().take();
        if let Some(pending) = pending {
            pending.cancel();
        }
    }

    fn is_pending(&self) -> bool {
        self.0
            .lock()
            .as_ref()
            .is_some_and(|pending| pending.is_pending())
    }
}

impl Drop for AutoResumeSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
