//! A tracer and a recognizer wired together behind one shared handle.
//!
//! Everything runs on the host's single event thread. Gesture handlers run
//! while the session is borrowed, so a handler must not call back into the
//! same session; doing so panics with a `RefCell` borrow error.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use crate::config::GestureConfig;
use crate::error::Result;
use crate::event::{GestureEvent, GestureKind};
use crate::frame::{Frame, FrameScheduler};
use crate::recognizer::GestureRecognizer;
use crate::tracer::{NativeTouchEvent, TouchLifeTracer};

struct SessionState {
    tracer: TouchLifeTracer,
    recognizer: GestureRecognizer,
}

#[derive(Clone)]
pub struct GestureSession {
    state: Rc<RefCell<SessionState>>,
}

impl GestureSession {
    pub fn new(config: GestureConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "gesture session: use_multi={} frame_sync={}",
            config.use_multi, config.frame_sync
        );
        Ok(Self {
            state: Rc::new(RefCell::new(SessionState {
                tracer: TouchLifeTracer::new(&config),
                recognizer: GestureRecognizer::new(config),
            })),
        })
    }

    pub fn config(&self) -> GestureConfig {
        self.state.borrow().recognizer.config().clone()
    }

    pub fn register(&self, kind: GestureKind, handler: impl FnMut(&GestureEvent) + 'static) {
        self.state.borrow_mut().recognizer.register(kind, handler);
    }

    pub fn handle(&self, event: NativeTouchEvent) {
        let mut state = self.state.borrow_mut();
        let SessionState { tracer, recognizer } = &mut *state;
        tracer.handle(event, recognizer);
    }

    /// Fires any long tap whose deadline is at or before `now`.
    pub fn tick(&self, now: f64) {
        let mut state = self.state.borrow_mut();
        let SessionState { tracer, recognizer } = &mut *state;
        recognizer.fire_due(now, tracer);
    }

    pub fn drain_frame(&self, frame: Frame) {
        let mut state = self.state.borrow_mut();
        let SessionState { tracer, recognizer } = &mut *state;
        tracer.drain_frame(frame, recognizer);
    }

    /// Registers a per-frame drain with `scheduler`. The listener holds a
    /// weak handle and stops doing work once the session is dropped.
    pub fn attach_frames(&self, scheduler: &mut dyn FrameScheduler) {
        let weak: Weak<RefCell<SessionState>> = Rc::downgrade(&self.state);
        scheduler.add_frame_listener(Box::new(move |frame| {
            if let Some(state) = weak.upgrade() {
                GestureSession { state }.drain_frame(frame);
            }
        }));
    }

    pub fn long_tap_deadline(&self) -> Option<f64> {
        self.state
            .borrow()
            .recognizer
            .pending_long_tap()
            .map(|p| p.deadline)
    }

    pub fn with_tracer<R>(&self, f: impl FnOnce(&TouchLifeTracer) -> R) -> R {
        f(&self.state.borrow().tracer)
    }

    pub fn with_recognizer<R>(&self, f: impl FnOnce(&GestureRecognizer) -> R) -> R {
        f(&self.state.borrow().recognizer)
    }

    /// Drops ended lives and resets recognizer state.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.tracer.clear_history();
        state.recognizer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ManualFrames;
    use crate::life::TouchSample;
    use crate::tracer::NativeEventKind;

    #[test]
    fn frame_listener_drains_parked_moves() {
        let session = GestureSession::new(GestureConfig {
            frame_sync: true,
            ..Default::default()
        })
        .unwrap();
        let mut frames = ManualFrames::new();
        session.attach_frames(&mut frames);

        session.handle(NativeTouchEvent::single(
            NativeEventKind::TouchStart,
            TouchSample::at(0, 0.0, 0.0),
            0.0,
        ));
        session.handle(NativeTouchEvent::single(
            NativeEventKind::TouchMove,
            TouchSample::at(0, 30.0, 0.0),
            20.0,
        ));
        assert_eq!(session.with_tracer(|t| t.history()[0].move_events.len()), 0);
        frames.tick();
        assert_eq!(session.with_tracer(|t| t.history()[0].move_events.len()), 1);
    }

    #[test]
    fn dropped_session_leaves_inert_listener() {
        let mut frames = ManualFrames::new();
        {
            let session = GestureSession::new(GestureConfig::default()).unwrap();
            session.attach_frames(&mut frames);
        }
        frames.tick();
        assert_eq!(frames.listener_count(), 1);
    }

    #[test]
    fn invalid_config_fails_construction() {
        let config = GestureConfig {
            long_tap_delay_ms: f64::NAN,
            ..Default::default()
        };
        assert!(GestureSession::new(config).is_err());
    }

    #[test]
    fn tick_reports_long_tap_deadline() {
        let session = GestureSession::new(GestureConfig::default()).unwrap();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        session.register(GestureKind::LongTap, move |_| *counter.borrow_mut() += 1);
        session.handle(NativeTouchEvent::single(
            NativeEventKind::TouchStart,
            TouchSample::at(0, 5.0, 5.0),
            100.0,
        ));
        assert_eq!(session.long_tap_deadline(), Some(850.0));
        session.tick(849.0);
        assert_eq!(*hits.borrow(), 0);
        session.tick(850.0);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(session.long_tap_deadline(), None);
    }
}
