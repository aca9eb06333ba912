use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use mamori::{
    player::PlayerEventKind, LiveSupport, MediaPlayer, MediaState, PlayerEvent, PlayerState,
    ReadyGate, SeekableRange, TelemetryEvent, WindowType,
};
use parking_lot::Mutex;

use crate::fake::FakePlayer;

/// Wires a gate to every event `player` emits.
fn attach(
    player: &Arc<FakePlayer>,
    initial_playback_time: Option<f64>,
    window_type: WindowType,
    live_support: LiveSupport,
) -> (Arc<Mutex<ReadyGate>>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let gate = Arc::new(Mutex::new(ReadyGate::new(
        initial_playback_time,
        window_type,
        live_support,
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    )));

    let listener = gate.clone();
    player.add_event_callback(Arc::new(move |event: &PlayerEvent| {
        listener.lock().evaluate(&TelemetryEvent::from(event));
    }));
    (gate, count)
}

#[test]
fn event_conversion() {
    let event = PlayerEvent::new(PlayerEventKind::TimeUpdate, PlayerState::Buffering)
        .with_current_time(12.)
        .with_seekable_range(SeekableRange::new(0., 60.));
    let telemetry = TelemetryEvent::from(&event);

    assert!(telemetry.time_update);
    let data = telemetry.data.expect("data");
    assert_eq!(data.current_time, Some(12.));
    assert_eq!(data.seekable_range, Some(SeekableRange::new(0., 60.)));
    assert_eq!(data.state, Some(MediaState::Waiting));

    let status = TelemetryEvent::from(&PlayerEvent::new(
        PlayerEventKind::Error,
        PlayerState::Error,
    ));
    assert!(!status.time_update);
    assert_eq!(
        status.data.and_then(|data| data.state),
        Some(MediaState::FatalError)
    );
}

#[test]
fn live_waits_for_known_range() {
    let player = FakePlayer::new();
    let (gate, count) = attach(&player, None, WindowType::Sliding, LiveSupport::Seekable);

    // engines report the sentinel range until the manifest is loaded
    player.set_position(0., SeekableRange::UNKNOWN);
    player.emit(PlayerEventKind::Buffering, PlayerState::Buffering);
    player.emit(PlayerEventKind::Playing, PlayerState::Playing);
    player.emit(PlayerEventKind::TimeUpdate, PlayerState::Playing);
    assert!(!gate.lock().is_ready());

    // position outside the range
    player.set_position(7300., SeekableRange::new(100., 7290.));
    player.emit(PlayerEventKind::TimeUpdate, PlayerState::Playing);
    assert!(!gate.lock().is_ready());

    player.set_position(7280., SeekableRange::new(100., 7290.));
    player.emit(PlayerEventKind::TimeUpdate, PlayerState::Playing);
    assert!(gate.lock().is_ready());

    // latched
    player.set_position(0., SeekableRange::UNKNOWN);
    player.emit(PlayerEventKind::Error, PlayerState::Error);
    assert!(gate.lock().is_ready());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn playable_live_ignores_range() {
    let player = FakePlayer::new();
    let (gate, count) = attach(&player, None, WindowType::Sliding, LiveSupport::Playable);

    player.set_position(0., SeekableRange::UNKNOWN);
    player.emit(PlayerEventKind::Playing, PlayerState::Playing);

    assert!(gate.lock().is_ready());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn fatal_error_is_never_ready() {
    let player = FakePlayer::new();
    let (gate, count) = attach(&player, None, WindowType::Static, LiveSupport::Seekable);

    player.set_position(10., SeekableRange::new(0., 100.));
    player.emit(PlayerEventKind::Error, PlayerState::Error);
    assert!(!gate.lock().is_ready());

    player.emit(PlayerEventKind::Playing, PlayerState::Playing);
    assert!(gate.lock().is_ready());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn static_resume_waits_for_offset() {
    let player = FakePlayer::new();
    let (gate, count) = attach(&player, Some(120.), WindowType::Static, LiveSupport::Seekable);

    player.set_position(0., SeekableRange::new(0., 3600.));
    player.emit(PlayerEventKind::Playing, PlayerState::Playing);
    assert!(!gate.lock().is_ready());

    player.set_position(120., SeekableRange::new(0., 3600.));
    player.emit(PlayerEventKind::TimeUpdate, PlayerState::Playing);
    assert!(gate.lock().is_ready());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
