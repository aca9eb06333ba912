use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{LiveSupport, MamoriResult, TransferFormat, WindowType};

/// Device and session settings handed to the playback components.
///
/// ```toml
/// window_type = "sliding"
/// live_support = "restartable"
///
/// [overrides]
/// force_begin_playback_to_end_of_window = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub window_type: WindowType,
    pub live_support: LiveSupport,
    pub transfer_format: Option<TransferFormat>,
    /// Offset requested when playback started, if any.
    pub initial_playback_time: Option<f64>,
    pub overrides: PlaybackOverrides,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOverrides {
    /// Start live playback at the live edge instead of wherever the engine chooses.
    pub force_begin_playback_to_end_of_window: bool,
    /// Never resume automatically after a pause.
    pub disable_auto_resume: bool,
}

impl PlaybackConfig {
    pub fn load(path: impl AsRef<Path>) -> MamoriResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> MamoriResult<Self> {
        Ok(toml::from_str(data)?)
    }
}
