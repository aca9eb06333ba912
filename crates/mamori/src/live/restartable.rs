use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use super::{begin_live_playback, initialise_live_media, AutoResumeSlot, PauseOptions};
use crate::{
    clock::{ElapsedClock, WallClock},
    config::{PlaybackConfig, PlaybackOverrides},
    player::{CallbackId, EventCallback, MediaOptions, MediaPlayer, PlayerEvent},
    window::delta_to_seconds,
    LiveSupport, MediaType, PlayerState, SeekableRange, TimeWindow, WindowType,
};

/// Live player for engines that can start at an offset but cannot tell where
/// they are afterwards.
///
/// The position is tracked with an [`ElapsedClock`] that is re-anchored on
/// every event the engine emits, and the seekable range is derived from the
/// manifest window and the time elapsed since playback began. Callbacks
/// registered through this player see events carrying these derived values
/// instead of whatever the engine reported.
pub struct RestartableLivePlayer<P: MediaPlayer + 'static> {
    player: Arc<P>,
    timing: Arc<Timing>,
    overrides: PlaybackOverrides,
    engine_listener: CallbackId,
    auto_resume: AutoResumeSlot,
}

struct Timing {
    window_type: WindowType,
    wall_clock: Arc<dyn WallClock>,
    time_window: RwLock<TimeWindow>,
    elapsed: Mutex<ElapsedClock>,
    playback_began_at: Mutex<Option<DateTime<Utc>>>,
}

impl Timing {
    fn on_engine_event(&self, event: &PlayerEvent) {
        let now = self.wall_clock.now();
        self.elapsed
            .lock()
            .reanchor(now, event.state == PlayerState::Playing);
    }

    /// Stops the clock without waiting for the engine to report the pause.
    fn hold(&self) {
        let now = self.wall_clock.now();
        self.elapsed.lock().reanchor(now, false);
    }

    fn begin(&self, current_time: f64) {
        let now = self.wall_clock.now();
        *self.playback_began_at.lock() = Some(now);
        self.elapsed.lock().set(current_time, now);
    }

    fn current_time(&self) -> f64 {
        self.elapsed.lock().current_time()
    }

    fn seekable_range(&self) -> SeekableRange {
        let window_length = self.time_window.read().length_seconds();
        let delta = match *self.playback_began_at.lock() {
            Some(began_at) => delta_to_seconds(self.wall_clock.now() - began_at),
            None => 0.,
        };

        let start = match self.window_type {
            WindowType::Sliding => delta,
            _ => 0.,
        };
        SeekableRange::new(start, window_length + delta)
    }
}

impl<P: MediaPlayer + 'static> RestartableLivePlayer<P> {
    pub fn new(
        player: Arc<P>,
        config: &PlaybackConfig,
        time_window: TimeWindow,
        wall_clock: Arc<dyn WallClock>,
    ) -> Self {
        let timing = Arc::new(Timing {
            window_type: config.window_type,
            wall_clock,
            time_window: RwLock::new(time_window),
            elapsed: Mutex::new(ElapsedClock::new()),
            playback_began_at: Mutex::new(None),
        });

        let engine_listener = {
            let timing = timing.clone();
            player.add_event_callback(Arc::new(move |event| timing.on_engine_event(event)))
        };

        Self {
            player,
            timing,
            overrides: config.overrides,
            engine_listener,
            auto_resume: AutoResumeSlot::default(),
        }
    }

    pub fn live_support(&self) -> LiveSupport {
        LiveSupport::Restartable
    }

    /// Replaces the window after a manifest refresh.
    pub fn update_time_window(&self, time_window: TimeWindow) {
        *self.timing.time_window.write() = time_window;
    }

    pub fn initialise_media(
        &self,
        media_type: MediaType,
        url: &str,
        mime_type: &str,
        source_container: &str,
        opts: &MediaOptions,
    ) {
        initialise_live_media(
            self.player.as_ref(),
            media_type,
            url,
            mime_type,
            source_container,
            opts,
        );
    }

    /// Starts playback at the live edge.
    pub fn begin_playback(&self) {
        let window_length = self.timing.time_window.read().length_seconds();
        self.timing.begin(window_length);
        begin_live_playback(self.player.as_ref(), &self.overrides);
    }

    pub fn begin_playback_from(&self, offset: f64) {
        self.timing.begin(offset);
        self.player.begin_playback_from(offset);
    }

    pub fn pause(&self, opts: PauseOptions) {
        self.timing.hold();
        self.player.pause();
        if opts.disable_auto_resume || self.overrides.disable_auto_resume {
            return;
        }
        self.auto_resume
            .arm(&self.player, self.current_time(), self.seekable_range());
    }

    pub fn resume(&self) {
        self.player.resume();
    }

    pub fn stop(&self) {
        self.auto_resume.cancel();
        self.player.stop();
    }

    pub fn reset(&self) {
        self.auto_resume.cancel();
        self.player.reset();
    }

    pub fn current_time(&self) -> f64 {
        self.timing.current_time()
    }

    pub fn seekable_range(&self) -> SeekableRange {
        self.timing.seekable_range()
    }

    pub fn is_auto_resume_pending(&self) -> bool {
        self.auto_resume.is_pending()
    }

    pub fn state(&self) -> PlayerState {
        self.player.state()
    }

    pub fn source(&self) -> Option<String> {
        self.player.source()
    }

    pub fn mime_type(&self) -> Option<String> {
        self.player.mime_type()
    }

    pub fn add_event_callback(&self, callback: EventCallback) -> CallbackId {
        let timing = self.timing.clone();
        self.player.add_event_callback(Arc::new(move |event| {
            let mut event = event.clone();
            event.current_time = Some(timing.current_time());
            event.seekable_range = Some(timing.seekable_range());
            callback(&event);
        }))
    }

    pub fn remove_event_callback(&self, id: CallbackId) {
        self.auto_resume.cancel();
        self.player.remove_event_callback(id);
    }
}

impl<P: MediaPlayer + 'static> Drop for RestartableLivePlayer<P> {
    fn drop(&mut self) {
        self.player.remove_event_callback(self.engine_listener);
    }
}
