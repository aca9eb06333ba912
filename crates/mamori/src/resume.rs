//! Automatic resume of paused live playback.
//!
//! When a live stream is paused, the start of a sliding window keeps moving
//! towards the paused position. Once it gets close, playback is resumed so the
//! position does not fall out of the window. A pause is the only thing this
//! expects to happen in the meantime: any other event can end the wait early.

use std::{fmt, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{runtime::Handle, task::JoinHandle, time::Instant};

use crate::{
    player::{CallbackId, EventCallback, PlayerEvent},
    SeekableRange,
};

/// Safety margin, in seconds, kept between the resume point and the window start.
pub const AUTO_RESUME_WINDOW_START_CUSHION_SECONDS: f64 = 8.;

pub type CancelPredicate = Box<dyn Fn(&PlayerEvent) -> bool + Send + Sync>;

/// Time to wait before resuming playback paused at `current_time`.
pub fn resume_delay(current_time: f64, seekable_range: SeekableRange) -> Duration {
    let seconds = (current_time - seekable_range.start - AUTO_RESUME_WINDOW_START_CUSHION_SECONDS)
        .max(0.);
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}

/// Resumes playback shortly before the window start reaches `current_time`.
///
/// A listener is registered through `add_listener` for the lifetime of the
/// wait. Events for which `is_cancelling` returns `true` end the wait without
/// resuming; other events are ignored. `on_resume` runs at most once and the
/// listener is removed exactly once, whichever way the wait ends.
///
/// Outside a tokio runtime nothing is scheduled and the returned handle is
/// already finished.
pub fn schedule<A, R, F>(
    current_time: f64,
    seekable_range: SeekableRange,
    add_listener: A,
    remove_listener: R,
    is_cancelling: Option<CancelPredicate>,
    on_resume: F,
) -> PendingResume
where
    A: FnOnce(EventCallback) -> CallbackId,
    R: Fn(CallbackId) + Send + Sync + 'static,
    F: FnOnce() + Send + 'static,
{
    let Ok(runtime) = Handle::try_current() else {
        tracing::warn!(current_time, "No tokio runtime, auto resume not scheduled");
        return PendingResume {
            shared: Arc::new(Shared {
                arming: Mutex::new(None),
                remove_listener: Box::new(remove_listener),
            }),
        };
    };

    let delay = resume_delay(current_time, seekable_range);
    let deadline = Instant::now() + delay;

    let shared = Arc::new(Shared {
        arming: Mutex::new(Some(Arming {
            timer: None,
            listener: None,
        })),
        remove_listener: Box::new(remove_listener),
    });

    let listener: EventCallback = {
        let shared = shared.clone();
        Arc::new(move |event| {
            let cancelling = is_cancelling
                .as_ref()
                .is_some_and(|is_cancelling| is_cancelling(event));
            if cancelling && shared.finish(true) {
                tracing::debug!(state = ?event.state, "Auto resume cancelled");
            }
        })
    };
    let listener_id = add_listener(listener);
    if !shared.attach_listener(listener_id) {
        return PendingResume { shared };
    }

    let timer = {
        let shared = shared.clone();
        runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if shared.finish(false) {
                tracing::debug!("Auto resuming playback");
                on_resume();
            }
        })
    };
    shared.attach_timer(timer);

    tracing::debug!(
        current_time,
        window_start = seekable_range.start,
        delay_ms = delay.as_millis() as u64,
        "Auto resume scheduled"
    );
    PendingResume { shared }
}

struct Arming {
    timer: Option<JoinHandle<()>>,
    listener: Option<CallbackId>,
}

struct Shared {
    /// `None` once the wait has ended.
    arming: Mutex<Option<Arming>>,
    remove_listener: Box<dyn Fn(CallbackId) + Send + Sync>,
}

impl Shared {
    /// Ends the wait. Returns `false` if it had already ended.
    fn finish(&self, abort_timer: bool) -> bool {
        let Some(arming) = self.arming.lock().take() else {
            return false;
        };

        if abort_timer {
            if let Some(timer) = arming.timer {
                timer.abort();
            }
        }
        if let Some(listener) = arming.listener {
            (self.remove_listener)(listener);
        }
        true
    }

    fn attach_listener(&self, listener: CallbackId) -> bool {
        let mut arming = self.arming.lock();
        match arming.as_mut() {
            Some(arming) => {
                arming.listener = Some(listener);
                true
            }
            None => {
                drop(arming);
                (self.remove_listener)(listener);
                false
            }
        }
    }

    fn attach_timer(&self, timer: JoinHandle<()>) {
        let mut arming = self.arming.lock();
        match arming.as_mut() {
            Some(arming) => arming.timer = Some(timer),
            None => timer.abort(),
        }
    }
}

/// Handle onto one scheduled auto resume.
///
/// Dropping the handle does not cancel the resume.
#[derive(Clone)]
pub struct PendingResume {
    shared: Arc<Shared>,
}

impl PendingResume {
    /// Cancels the resume if it is still pending. Returns whether it was.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.finish(true);
        if cancelled {
            tracing::debug!("Auto resume cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.shared.arming.lock().is_some()
    }
}

impl fmt::Debug for PendingResume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResume")
            .field("pending", &self.is_pending())
            .finish()
    }
}
