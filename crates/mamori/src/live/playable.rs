use std::sync::Arc;

use super::{begin_live_playback, initialise_live_media};
use crate::{
    config::{PlaybackConfig, PlaybackOverrides},
    player::{CallbackId, EventCallback, MediaOptions, MediaPlayer},
    LiveSupport, MediaType, PlayerState,
};

/// Live player for engines that can neither report nor control the live position.
pub struct PlayableLivePlayer<P> {
    player: Arc<P>,
    overrides: PlaybackOverrides,
}

impl<P: MediaPlayer> PlayableLivePlayer<P> {
    pub fn new(player: Arc<P>, config: &PlaybackConfig) -> Self {
        Self {
            player,
            overrides: config.overrides,
        }
    }

    pub fn live_support(&self) -> LiveSupport {
        LiveSupport::Playable
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

    pub fn stop(&self) {
        self.player.stop();
    }

    pub fn reset(&self) {
        self.player.reset();
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
        self.player.remove_event_callback(id);
    }
}
