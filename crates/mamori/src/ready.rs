use crate::{
    player::{PlayerEvent, PlayerEventKind},
    LiveSupport, MediaState, SeekableRange, WindowType,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryData {
    pub current_time: Option<f64>,
    pub seekable_range: Option<SeekableRange>,
    pub state: Option<MediaState>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryEvent {
    /// Whether the event only reports a position change.
    pub time_update: bool,
    pub data: Option<TelemetryData>,
}

impl From<&PlayerEvent> for TelemetryEvent {
    fn from(event: &PlayerEvent) -> Self {
        Self {
            time_update: event.kind == PlayerEventKind::TimeUpdate,
            data: Some(TelemetryData {
                current_time: event.current_time,
                seekable_range: event.seekable_range,
                state: Some(event.state.into()),
            }),
        }
    }
}

type ReadyCallback = Box<dyn FnOnce() + Send>;

/// Holds back the "playback started" signal until telemetry is consistent.
///
/// Engines tend to report a state before they report a usable position, and a
/// live seekable range before it is known. The gate opens on the first event
/// that is fully valid and stays open.
pub struct ReadyGate {
    initial_playback_time: Option<f64>,
    window_type: WindowType,
    live_support: LiveSupport,
    ready: bool,
    on_ready: Option<ReadyCallback>,
}

impl ReadyGate {
    pub fn new<F>(
        initial_playback_time: Option<f64>,
        window_type: WindowType,
        live_support: LiveSupport,
        on_ready: F,
    ) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            initial_playback_time,
            window_type,
            live_support,
            ready: false,
            on_ready: Some(Box::new(on_ready)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Feeds one event through the gate and returns whether it is open.
    pub fn evaluate(&mut self, event: &TelemetryEvent) -> bool {
        if self.ready {
            return true;
        }

        self.ready = match &event.data {
            None => false,
            Some(data) if event.time_update => self.is_valid_time(data),
            Some(data) => is_valid_state(data) && self.is_valid_time(data),
        };

        if self.ready {
            tracing::debug!(?event, "Playback ready");
            if let Some(on_ready) = self.on_ready.take() {
                on_ready();
            }
        }
        self.ready
    }

    fn is_valid_time(&self, data: &TelemetryData) -> bool {
        if self.window_type == WindowType::Static {
            self.is_valid_static_time(data.current_time)
        } else {
            self.is_valid_live_time(data.current_time, data.seekable_range)
        }
    }

    fn is_valid_static_time(&self, current_time: Option<f64>) -> bool {
        let Some(current_time) = current_time else {
            return false;
        };

        match self.initial_playback_time {
            Some(initial) if initial != 0. => current_time > 0.,
            _ => current_time >= 0.,
        }
    }

    fn is_valid_live_time(
        &self,
        current_time: Option<f64>,
        seekable_range: Option<SeekableRange>,
    ) -> bool {
        let Some(current_time) = current_time else {
            return false;
        };

        // the range reported by playable engines cannot be trusted
        if self.live_support == LiveSupport::Playable {
            return current_time >= 0.;
        }

        seekable_range
            .is_some_and(|range| range.is_known() && range.contains(current_time))
    }
}

fn is_valid_state(data: &TelemetryData) -> bool {
    data.state.is_some_and(|state| state != MediaState::FatalError)
}
