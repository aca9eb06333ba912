use crate::{LiveSupport, TransferFormat, WindowType};

/// Seconds before the natural end of an asset during which a failure is
/// treated as the end of the stream rather than a reason to switch sources.
pub const END_OF_STREAM_TOLERANCE_SECONDS: f64 = 5.;

/// Decides whether playback should move to the next source after a failure.
///
/// `remaining_source_count` includes the source currently playing, so a value
/// of one or less means there is nothing to fail over to.
pub fn should_failover(
    remaining_source_count: usize,
    duration: Option<f64>,
    current_time: Option<f64>,
    live_support: Option<LiveSupport>,
    window_type: WindowType,
    transfer_format: TransferFormat,
) -> bool {
    let decision = if remaining_source_count <= 1 {
        false
    } else if window_type == WindowType::Static {
        !is_about_to_end(duration, current_time)
    } else {
        // A restartable HLS player keeps its own clock, which cannot follow a source swap.
        !(transfer_format == TransferFormat::Hls && live_support == Some(LiveSupport::Restartable))
    };

    tracing::debug!(
        remaining_source_count,
        ?duration,
        ?current_time,
        ?live_support,
        ?window_type,
        ?transfer_format,
        decision,
        "Failover decision"
    );
    decision
}

fn is_about_to_end(duration: Option<f64>, current_time: Option<f64>) -> bool {
    match (duration, current_time) {
        (Some(duration), Some(current_time)) if duration > 0. => {
            current_time > duration - END_OF_STREAM_TOLERANCE_SECONDS
        }
        // playback has not started
        _ => false,
    }
}

/// Snapshot of the playback telemetry a failover decision is made from.
#[derive(Debug, Clone, Copy)]
pub struct FailoverInput {
    pub remaining_source_count: usize,
    pub duration: Option<f64>,
    pub current_time: Option<f64>,
    pub live_support: Option<LiveSupport>,
    pub window_type: WindowType,
    pub transfer_format: TransferFormat,
}

impl FailoverInput {
    pub fn should_failover(&self) -> bool {
        should_failover(
            self.remaining_source_count,
            self.duration,
            self.current_time,
            self.live_support,
            self.window_type,
            self.transfer_format,
        )
    }
}
