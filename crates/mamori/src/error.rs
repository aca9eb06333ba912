use thiserror::Error;

/// Failure to derive a [`TimeWindow`](crate::TimeWindow) from a manifest.
///
/// The messages are part of the contract with callers that forward them to
/// their own error surface, so they must stay stable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Error parsing DASH manifest attributes")]
    DashAttributes,

    #[error("Error parsing DASH manifest")]
    DashMalformed,

    #[error("Error parsing HLS manifest")]
    Hls,
}

#[derive(Error, Debug)]
pub enum MamoriError {
    #[error(transparent)]
    ManifestError(#[from] ManifestError),

    #[error("Live playback is not supported with live support {0:?}")]
    LiveUnsupported(crate::LiveSupport),

    #[error(transparent)]
    ConfigError(#[from] toml::de::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub type MamoriResult<T> = Result<T, MamoriError>;
