//! Progress poller
//!
//! Owns the single active repeating timer and derives the synthetic `step`
//! payload from the current track's backend handle. The poller is restarted
//! by the native `play` and `seek` hooks and is never stopped on pause: once
//! running it keeps firing (reporting `playing: false` after a pause) until
//! a later restart replaces it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::backend::BackendHandle;
use crate::events::StepInfo;
use crate::timer::{TimerDriver, TimerId};

struct PollerState {
    driver: Box<dyn TimerDriver>,
    interval: Duration,
    active: Option<TimerId>,
}

/// Restartable repeating sampler for the `step` event
///
/// Cloneable single-threaded handle; the backend adapter's `play` and `seek`
/// hooks hold clones so they can restart polling from inside a native
/// callback. At most one timer is active per player: starting a new one
/// cancels the previous, so timers never overlap or accumulate drift.
#[derive(Clone)]
pub struct ProgressPoller {
    state: Rc<RefCell<PollerState>>,
}

impl ProgressPoller {
    pub(crate) fn new(driver: Box<dyn TimerDriver>, interval: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(PollerState {
                driver,
                interval,
                active: None,
            })),
        }
    }

    /// Cancel any active timer and schedule a fresh one
    pub fn restart(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.active.take() {
            state.driver.cancel(id);
        }
        let interval = state.interval;
        let id = state.driver.schedule(interval);
        state.active = Some(id);
    }

    /// Whether `id` is the currently active timer
    pub(crate) fn is_active(&self, id: TimerId) -> bool {
        self.state.borrow().active == Some(id)
    }
}

/// Derive a progress sample from an optionally-present handle
///
/// A missing handle, or a zero or non-finite duration, degrades to zeros
/// rather than NaN.
pub(crate) fn sample(handle: Option<&mut (dyn BackendHandle + 'static)>) -> StepInfo {
    match handle {
        Some(handle) => {
            let seek = handle.seek(None);
            let duration = handle.duration();
            let percent = if duration > 0.0 && duration.is_finite() {
                seek / duration * 100.0
            } else {
                0.0
            };
            StepInfo {
                seek,
                percent,
                playing: handle.playing(),
            }
        }
        None => StepInfo {
            seek: 0.0,
            percent: 0.0,
            playing: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeCallback;
    use crate::events::EventKind;

    #[derive(Default)]
    struct RecordingTimer {
        log: Rc<RefCell<Vec<String>>>,
        next: TimerId,
    }

    impl TimerDriver for RecordingTimer {
        fn schedule(&mut self, interval: Duration) -> TimerId {
            self.next += 1;
            self.log
                .borrow_mut()
                .push(format!("schedule {} {:?}", self.next, interval));
            self.next
        }

        fn cancel(&mut self, id: TimerId) {
            self.log.borrow_mut().push(format!("cancel {id}"));
        }
    }

    struct FixedHandle {
        position: f64,
        duration: f64,
        playing: bool,
    }

    impl BackendHandle for FixedHandle {
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn stop(&mut self) {}
        fn seek(&mut self, position: Option<f64>) -> f64 {
            if let Some(position) = position {
                self.position = position;
            }
            self.position
        }
        fn duration(&self) -> f64 {
            self.duration
        }
        fn playing(&self) -> bool {
            self.playing
        }
        fn on(&mut self, _kind: EventKind, _callback: NativeCallback) {}
    }

    #[test]
    fn restart_replaces_previous_timer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let poller = ProgressPoller::new(
            Box::new(RecordingTimer {
                log: Rc::clone(&log),
                next: 0,
            }),
            Duration::from_millis(200),
        );

        poller.restart();
        poller.restart();

        assert_eq!(
            *log.borrow(),
            vec![
                "schedule 1 200ms".to_string(),
                "cancel 1".to_string(),
                "schedule 2 200ms".to_string(),
            ]
        );
        assert!(!poller.is_active(1));
        assert!(poller.is_active(2));
    }

    #[test]
    fn sample_reports_position_and_percent() {
        let mut handle = FixedHandle {
            position: 50.0,
            duration: 200.0,
            playing: true,
        };
        let step = sample(Some(&mut handle));
        assert_eq!(step.seek, 50.0);
        assert_eq!(step.percent, 25.0);
        assert!(step.playing);
    }

    #[test]
    fn zero_duration_degrades_to_zero_percent() {
        let mut handle = FixedHandle {
            position: 3.0,
            duration: 0.0,
            playing: true,
        };
        let step = sample(Some(&mut handle));
        assert_eq!(step.percent, 0.0);
        assert!(!step.percent.is_nan());
    }

    #[test]
    fn missing_handle_samples_as_idle() {
        let step = sample(None);
        assert_eq!(step.seek, 0.0);
        assert_eq!(step.percent, 0.0);
        assert!(!step.playing);
    }
}
