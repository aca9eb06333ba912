use std::sync::Arc;

use super::{begin_live_playback, initialise_live_media, AutoResumeSlot, PauseOptions};
use crate::{
    config::{PlaybackConfig, PlaybackOverrides},
    player::{CallbackId, EventCallback, MediaOptions, MediaPlayer},
    resume::AUTO_RESUME_WINDOW_START_CUSHION_SECONDS,
    LiveSupport, MediaType, PlayerState, SeekableRange, WindowType,
};

/// Live player for engines that report and control the live position themselves.
pub struct SeekableLivePlayer<P: MediaPlayer + 'static> {
    player: Arc<P>,
    window_type: WindowType,
    overrides: PlaybackOverrides,
    auto_resume: AutoResumeSlot,
}

impl<P: MediaPlayer + 'static> SeekableLivePlayer<P> {
    pub fn new(player: Arc<P>, config: &PlaybackConfig) -> Self {
        Self {
            player,
            window_type: config.window_type,
            overrides: config.overrides,
            auto_resume: AutoResumeSlot::default(),
        }
    }

    pub fn live_support(&self) -> LiveSupport {
        LiveSupport::Seekable
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

    pub fn begin_playback(&self) {
        begin_live_playback(self.player.as_ref(), &self.overrides);
    }

    pub fn begin_playback_from(&self, offset: f64) {
        self.player.begin_playback_from(offset);
    }

    pub fn play_from(&self, offset: f64) {
        let was_paused = self.player.state() == PlayerState::Paused;
        self.player.play_from(offset);

        if was_paused
            && self.window_type == WindowType::Sliding
            && !self.overrides.disable_auto_resume
        {
            let current_time = self.player.current_time().unwrap_or(offset);
            if let Some(seekable_range) = self.player.seekable_range() {
                self.auto_resume
                    .arm(&self.player, current_time, seekable_range);
            }
        }
    }

    /// Pauses playback, resuming automatically before the sliding window
    /// catches up with the paused position.
    ///
    /// Pausing within the cushion of the window start would leave no time to
    /// resume, so the engine is only toggled through pause and back to play.
    pub fn pause(&self, opts: PauseOptions) {
        let (Some(current_time), Some(seekable_range)) =
            (self.player.current_time(), self.player.seekable_range())
        else {
            tracing::debug!("Live position unknown, pausing without auto resume");
            self.player.pause();
            return;
        };
        let seconds_until_start_of_window = current_time - seekable_range.start;

        if opts.disable_auto_resume || self.overrides.disable_auto_resume {
            self.player.pause();
        } else if seconds_until_start_of_window <= AUTO_RESUME_WINDOW_START_CUSHION_SECONDS {
            tracing::debug!(
                seconds_until_start_of_window,
                "Too close to the window start, not pausing"
            );
            self.player.pause();
            self.player.resume();
        } else {
            self.player.pause();
            if self.window_type == WindowType::Sliding {
                self.auto_resume
                    .arm(&self.player, current_time, seekable_range);
            }
        }
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

    pub fn current_time(&self) -> Option<f64> {
        self.player.current_time()
    }

    pub fn seekable_range(&self) -> Option<SeekableRange> {
        self.player.seekable_range()
    }

    pub fn duration(&self) -> Option<f64> {
        self.player.duration()
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
        self.player.add_event_callback(callback)
    }

    pub fn remove_event_callback(&self, id: CallbackId) {
        self.auto_resume.cancel();
        self.player.remove_event_callback(id);
    }
}
