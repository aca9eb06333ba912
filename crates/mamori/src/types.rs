use serde::{Deserialize, Serialize};

/// Shape of the presentation window, fixed for the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// On-demand asset with a fixed duration.
    #[default]
    Static,
    /// Live window whose start is pinned to the stream start.
    Growing,
    /// Live window whose start advances with time.
    Sliding,
}

impl WindowType {
    pub fn is_live(&self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// How much control a device has over live playback position.
///
/// Variants are ordered by capability, so `LiveSupport::Seekable > LiveSupport::Playable`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LiveSupport {
    None,
    /// Can play live streams but neither reports nor controls the position.
    Playable,
    /// Can start from an offset but does not report a usable position.
    Restartable,
    /// Full native control over the live position.
    #[default]
    Seekable,
}

impl LiveSupport {
    pub fn is_live_capable(&self) -> bool {
        *self > Self::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferFormat {
    Dash,
    Hls,
}

impl TransferFormat {
    /// Guesses the manifest format without touching the network.
    ///
    /// The url extension is checked first, then the content type, and finally
    /// the body itself. Anything undecidable is treated as DASH.
    pub fn detect(url: &str, content_type: Option<&str>, body: Option<&str>) -> Self {
        // 1. check extension
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if path.ends_with(".m3u8") {
            return Self::Hls;
        } else if path.ends_with(".mpd") {
            return Self::Dash;
        }

        // 2. check content type
        let content_type = content_type.map(|c| {
            c.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_lowercase()
        });
        match content_type.as_deref() {
            Some("application/x-mpegurl" | "application/vnd.apple.mpegurl") => return Self::Hls,
            Some("application/dash+xml") => return Self::Dash,
            _ => {}
        }

        // 3. check body
        match body {
            Some(body) if body.trim_start().starts_with("#EXTM3U") => Self::Hls,
            _ => Self::Dash,
        }
    }
}

/// Seekable interval in seconds, on the same time base as the playback position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeekableRange {
    pub start: f64,
    pub end: f64,
}

impl SeekableRange {
    /// Sentinel reported by engines before the range is known.
    pub const UNKNOWN: Self = Self {
        start: 0.,
        end: 0.,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn is_known(&self) -> bool {
        !(self.start == 0. && self.end == 0.)
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Audio,
    Video,
    LiveAudio,
    LiveVideo,
}

impl MediaType {
    /// Maps on-demand media types onto their live equivalents.
    pub fn to_live(self) -> Self {
        match self {
            Self::Audio => Self::LiveAudio,
            Self::Video => Self::LiveVideo,
            live => live,
        }
    }
}

/// State reported by the underlying media engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlayerState {
    #[default]
    Empty,
    Stopped,
    Buffering,
    Playing,
    Paused,
    Complete,
    Error,
}

/// State as surfaced to telemetry consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaState {
    Stopped,
    Paused,
    Playing,
    Waiting,
    Ended,
    FatalError,
}

impl From<PlayerState> for MediaState {
    fn from(state: PlayerState) -> Self {
        match state {
            PlayerState::Empty | PlayerState::Stopped => Self::Stopped,
            PlayerState::Buffering => Self::Waiting,
            PlayerState::Playing => Self::Playing,
            PlayerState::Paused => Self::Paused,
            PlayerState::Complete => Self::Ended,
            PlayerState::Error => Self::FatalError,
        }
    }
}
