//! Classifies tracer notifications into named gestures.
//!
//! One finger produces a continuous drag stream (`dragstart`, `dragging`,
//! `dragend`) and, at release, at most one terminal classification: `tap`
//! or `doubletap` for short stationary touches, `swipe` plus a directional
//! alias for short fast ones. `longtap` comes from an armed deadline that is
//! cancelled by movement, release or a second finger. With `use_multi` on,
//! the first two concurrent fingers form a pair that reports `zoom` and
//! `rotate` relative to the span they had when the second one landed.

use std::collections::HashMap;

use log::debug;

use crate::config::GestureConfig;
use crate::event::{Dispatcher, GestureEvent, GestureKind, SwipeDirection};
use crate::geometry::{Point, signed_angle_deg, span_ratio};
use crate::life::{Identifier, LifeId, TouchLife};
use crate::tracer::{LifeListener, TouchLifeTracer};

/// Armed long-tap deadline for one life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingLongTap {
    pub life_id: LifeId,
    pub identifier: Identifier,
    pub position: Point,
    pub deadline: f64,
}

/// Last emitted `tap`, waiting for a partner to become a `doubletap`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrevTap {
    pub position: Point,
    pub time: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Suppression {
    tap: bool,
    swipe: bool,
}

pub struct GestureRecognizer {
    config: GestureConfig,
    dispatcher: Dispatcher,
    pre_life: Option<LifeId>,
    cur_life: Option<LifeId>,
    prev_tap: Option<PrevTap>,
    pending_long_tap: Option<PendingLongTap>,
    suppression: HashMap<LifeId, Suppression>,
    multi_touch_active: bool,
    /// `multistart` fired and its `multiend` has not yet.
    multi_open: bool,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(),
            pre_life: None,
            cur_life: None,
            prev_tap: None,
            pending_long_tap: None,
            suppression: HashMap::new(),
            multi_touch_active: false,
            multi_open: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn register(&mut self, kind: GestureKind, handler: impl FnMut(&GestureEvent) + 'static) {
        self.dispatcher.register(kind, handler);
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn pre_life(&self) -> Option<LifeId> {
        self.pre_life
    }

    pub fn cur_life(&self) -> Option<LifeId> {
        self.cur_life
    }

    pub fn prev_tap(&self) -> Option<PrevTap> {
        self.prev_tap
    }

    pub fn pending_long_tap(&self) -> Option<PendingLongTap> {
        self.pending_long_tap
    }

    pub fn is_multi_touch_active(&self) -> bool {
        self.multi_touch_active
    }

    pub fn is_tap_suppressed(&self, life: LifeId) -> bool {
        self.suppression.get(&life).is_some_and(|s| s.tap)
    }

    pub fn is_swipe_suppressed(&self, life: LifeId) -> bool {
        self.suppression.get(&life).is_some_and(|s| s.swipe)
    }

    /// Cancels the long-tap deadline and forgets all pairing state.
    pub fn reset(&mut self) {
        self.pre_life = None;
        self.cur_life = None;
        self.prev_tap = None;
        self.pending_long_tap = None;
        self.suppression.clear();
        self.multi_touch_active = false;
        self.multi_open = false;
    }

    /// Fires `longtap` if its deadline has passed by `now`.
    pub fn fire_due(&mut self, now: f64, tracer: &TouchLifeTracer) {
        let Some(pending) = self.pending_long_tap else {
            return;
        };
        if now < pending.deadline {
            return;
        }
        self.pending_long_tap = None;
        debug!("{} long tap", pending.life_id);
        let mut event = GestureEvent::new(GestureKind::LongTap, pending.position, now)
            .with_identifier(pending.identifier);
        if let Some(life) = tracer.life(pending.life_id) {
            event = event.with_life(life);
        }
        self.emit(event);
    }

    fn emit(&mut self, event: GestureEvent) {
        self.dispatcher.dispatch(&event);
    }

    fn arm_long_tap(&mut self, life: &TouchLife) {
        let start = &life.start_event;
        self.pending_long_tap = Some(PendingLongTap {
            life_id: life.id,
            identifier: life.identifier(),
            position: start.position(),
            deadline: start.trigger_time + self.config.long_tap_delay_ms,
        });
    }

    fn cancel_long_tap_for(&mut self, life: LifeId) {
        if self.pending_long_tap.is_some_and(|p| p.life_id == life) {
            self.pending_long_tap = None;
        }
    }

    fn pair_contains(&self, life: LifeId) -> bool {
        self.pre_life == Some(life) || self.cur_life == Some(life)
    }

    fn enter_multi(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        let pair: Vec<LifeId> = tracer.active().take(2).map(|l| l.id).collect();
        let &[pre, cur] = pair.as_slice() else {
            return;
        };
        self.pre_life = Some(pre);
        self.cur_life = Some(cur);
        self.multi_touch_active = true;
        self.multi_open = true;
        self.pending_long_tap = None;
        self.prev_tap = None;
        for active in tracer.active() {
            self.suppression.insert(
                active.id,
                Suppression {
                    tap: true,
                    swipe: true,
                },
            );
        }
        debug!("multi touch started with {pre} and {cur}");
        let event = GestureEvent::new(
            GestureKind::MultiStart,
            life.start_event.position(),
            life.start_event.trigger_time,
        )
        .with_identifier(life.identifier());
        self.emit(event);
    }

    fn multi_change(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        let (Some(pre), Some(cur)) = (
            self.pre_life.and_then(|id| tracer.life(id)),
            self.cur_life.and_then(|id| tracer.life(id)),
        ) else {
            return;
        };
        let initial = cur.start_event.position() - pre.start_event.position();
        let pre_now = pre.last_move_or_start().position();
        let cur_now = cur.last_move_or_start().position();
        let current = cur_now - pre_now;
        let center = Point::new((pre_now.x + cur_now.x) / 2.0, (pre_now.y + cur_now.y) / 2.0);
        let time = life.last_event().trigger_time;

        let mut change = GestureEvent::new(GestureKind::MultiChange, center, time)
            .with_identifier(life.identifier());
        match (span_ratio(initial, current), signed_angle_deg(initial, current)) {
            (Some(rate), Some(angle)) => {
                change = change.with_zoom_rate(rate).with_angle(angle);
                self.emit(GestureEvent::new(GestureKind::Zoom, center, time).with_zoom_rate(rate));
                self.emit(GestureEvent::new(GestureKind::Rotate, center, time).with_angle(angle));
            }
            _ => debug!("degenerate finger span, zoom and rotate skipped"),
        }
        self.emit(change);
    }

    /// Emits `dragend` and unwinds long-tap and pair state for an ending life.
    /// Returns the life's suppression flags for classification.
    fn release(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) -> Suppression {
        let end = life.last_event();
        self.emit(
            GestureEvent::new(GestureKind::DragEnd, end.position(), end.trigger_time)
                .with_identifier(life.identifier())
                .with_life(life),
        );
        self.cancel_long_tap_for(life.id);
        let flags = self.suppression.remove(&life.id).unwrap_or_default();

        // losing a pair member stops zoom/rotate; multiend waits for one contact
        if self.pair_contains(life.id) {
            self.pre_life = None;
            self.cur_life = None;
        }
        if self.multi_open && tracer.active_count() <= 1 {
            self.multi_open = false;
            debug!("multi touch ended, {} contacts remain", tracer.active_count());
            self.emit(
                GestureEvent::new(GestureKind::MultiEnd, end.position(), end.trigger_time)
                    .with_identifier(life.identifier()),
            );
        }
        if tracer.active_count() == 0 {
            self.multi_touch_active = false;
        }
        flags
    }

    fn classify_end(&mut self, life: &TouchLife, flags: Suppression) {
        let Some(end) = life.end_event else {
            return;
        };
        let end_pos = end.position();
        let distance = life.distance();

        let is_tap = !flags.tap
            && life.life_time < self.config.tap_max_duration_ms
            && distance <= self.config.tap_max_distance;
        if is_tap {
            let paired = self.prev_tap.is_some_and(|prev| {
                end.trigger_time - prev.time <= self.config.double_tap_interval_ms
                    && prev.position.distance_to(end_pos) <= self.config.double_tap_max_distance
            });
            let kind = if paired {
                self.prev_tap = None;
                GestureKind::DoubleTap
            } else {
                self.prev_tap = Some(PrevTap {
                    position: end_pos,
                    time: end.trigger_time,
                });
                GestureKind::Tap
            };
            debug!("{} classified as {kind}", life.id);
            let event = GestureEvent::new(kind, end_pos, end.trigger_time)
                .with_identifier(life.identifier())
                .with_life(life);
            self.emit(event);
            return;
        }

        let is_swipe = !flags.swipe
            && life.life_time < self.config.swipe_max_duration_ms
            && distance > self.config.swipe_min_distance;
        if is_swipe {
            self.prev_tap = None;
            let direction = SwipeDirection::between(life.start_event.position(), end_pos);
            debug!("{} classified as swipe {direction:?}", life.id);
            let event = GestureEvent::new(GestureKind::Swipe, end_pos, end.trigger_time)
                .with_identifier(life.identifier())
                .with_direction(direction)
                .with_life(life);
            let alias = event.retagged(direction.alias());
            self.emit(event);
            self.emit(alias);
        }
    }
}

impl LifeListener for GestureRecognizer {
    fn on_life_start(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        let start = &life.start_event;
        self.emit(
            GestureEvent::new(GestureKind::DragStart, start.position(), start.trigger_time)
                .with_identifier(life.identifier()),
        );
        self.suppression.insert(life.id, Suppression::default());

        if self.config.use_multi && !self.multi_open && tracer.active_count() >= 2 {
            self.enter_multi(life, tracer);
        } else if self.multi_touch_active {
            self.suppression.insert(
                life.id,
                Suppression {
                    tap: true,
                    swipe: true,
                },
            );
        } else {
            self.arm_long_tap(life);
        }
    }

    fn on_life_change(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        let last = life.last_move_or_start();
        self.emit(
            GestureEvent::new(GestureKind::Dragging, last.position(), last.trigger_time)
                .with_identifier(life.identifier()),
        );

        if life.distance() > self.config.tap_max_distance {
            if let Some(flags) = self.suppression.get_mut(&life.id) {
                flags.tap = true;
            }
            self.cancel_long_tap_for(life.id);
        }

        if self.multi_touch_active && self.pair_contains(life.id) {
            self.multi_change(life, tracer);
        }
    }

    fn on_life_end(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        let flags = self.release(life, tracer);
        self.classify_end(life, flags);
    }

    fn on_life_abandoned(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        debug!("{} abandoned without an end event", life.id);
        self.release(life, tracer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::TouchSample;
    use crate::tracer::{NativeEventKind, NativeTouchEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Rig {
        tracer: TouchLifeTracer,
        recognizer: GestureRecognizer,
        log: Rc<RefCell<Vec<GestureEvent>>>,
    }

    impl Rig {
        fn new(config: GestureConfig) -> Self {
            let log = Rc::new(RefCell::new(Vec::new()));
            let mut recognizer = GestureRecognizer::new(config.clone());
            for kind in GestureKind::ALL {
                let log = log.clone();
                recognizer.register(kind, move |e| log.borrow_mut().push(e.clone()));
            }
            Self {
                tracer: TouchLifeTracer::new(&config),
                recognizer,
                log,
            }
        }

        fn send(&mut self, kind: NativeEventKind, id: Identifier, x: f64, y: f64, t: f64) {
            let event = NativeTouchEvent::single(kind, TouchSample::at(id, x, y), t);
            self.tracer.handle(event, &mut self.recognizer);
        }

        fn kinds(&self) -> Vec<GestureKind> {
            self.log.borrow().iter().map(|e| e.kind).collect()
        }

        fn count(&self, kind: GestureKind) -> usize {
            self.log.borrow().iter().filter(|e| e.kind == kind).count()
        }
    }

    use crate::tracer::NativeEventKind::{TouchEnd, TouchMove, TouchStart};

    #[test]
    fn short_stationary_touch_is_a_tap() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 100.0, 100.0, 0.0);
        rig.send(TouchEnd, 0, 105.0, 102.0, 150.0);
        assert_eq!(
            rig.kinds(),
            vec![GestureKind::DragStart, GestureKind::DragEnd, GestureKind::Tap]
        );
        let log = rig.log.borrow();
        assert_eq!(log[0].create_time, 0.0);
        assert_eq!(log[1].create_time, 150.0);
        assert_eq!(log[2].position, Point::new(105.0, 102.0));
        assert!(log[2].life.is_some());
    }

    #[test]
    fn fast_long_touch_is_a_swipe_right() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchMove, 0, 50.0, 0.0, 50.0);
        rig.send(TouchEnd, 0, 50.0, 0.0, 120.0);
        assert_eq!(
            rig.kinds(),
            vec![
                GestureKind::DragStart,
                GestureKind::Dragging,
                GestureKind::DragEnd,
                GestureKind::Swipe,
                GestureKind::SwipeRight,
            ]
        );
        let log = rig.log.borrow();
        assert_eq!(log[3].direction, Some(SwipeDirection::Right));
        assert_eq!(log[4].direction, Some(SwipeDirection::Right));
    }

    #[test]
    fn slow_drag_has_no_terminal_gesture() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchMove, 0, 80.0, 0.0, 200.0);
        rig.send(TouchEnd, 0, 120.0, 0.0, 400.0);
        assert_eq!(
            rig.kinds(),
            vec![GestureKind::DragStart, GestureKind::Dragging, GestureKind::DragEnd]
        );
    }

    #[test]
    fn tap_then_close_tap_is_one_doubletap() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 10.0, 10.0, 0.0);
        rig.send(TouchEnd, 0, 10.0, 10.0, 60.0);
        rig.send(TouchStart, 0, 12.0, 11.0, 150.0);
        rig.send(TouchEnd, 0, 12.0, 11.0, 200.0);
        assert_eq!(rig.count(GestureKind::Tap), 1);
        assert_eq!(rig.count(GestureKind::DoubleTap), 1);
        assert_eq!(rig.recognizer.prev_tap(), None);

        // a third tap starts a new pairing rather than reusing the consumed one
        rig.send(TouchStart, 0, 12.0, 11.0, 260.0);
        rig.send(TouchEnd, 0, 12.0, 11.0, 300.0);
        assert_eq!(rig.count(GestureKind::DoubleTap), 1);
        assert_eq!(rig.count(GestureKind::Tap), 2);
        assert!(rig.recognizer.prev_tap().is_some());
    }

    #[test]
    fn far_or_late_second_tap_stays_a_tap() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 10.0, 10.0, 0.0);
        rig.send(TouchEnd, 0, 10.0, 10.0, 50.0);
        rig.send(TouchStart, 0, 60.0, 10.0, 100.0);
        rig.send(TouchEnd, 0, 60.0, 10.0, 150.0);
        rig.send(TouchStart, 0, 60.0, 10.0, 900.0);
        rig.send(TouchEnd, 0, 60.0, 10.0, 950.0);
        assert_eq!(rig.count(GestureKind::Tap), 3);
        assert_eq!(rig.count(GestureKind::DoubleTap), 0);
    }

    #[test]
    fn long_tap_fires_once_deadline_passes() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 30.0, 40.0, 1000.0);
        let pending = rig.recognizer.pending_long_tap().unwrap();
        assert_eq!(pending.deadline, 1750.0);

        rig.recognizer.fire_due(1700.0, &rig.tracer);
        assert_eq!(rig.count(GestureKind::LongTap), 0);
        rig.recognizer.fire_due(1750.0, &rig.tracer);
        rig.recognizer.fire_due(1800.0, &rig.tracer);
        assert_eq!(rig.count(GestureKind::LongTap), 1);
        assert_eq!(rig.log.borrow().last().unwrap().position, Point::new(30.0, 40.0));

        rig.send(TouchEnd, 0, 30.0, 40.0, 1900.0);
        assert_eq!(rig.count(GestureKind::Tap), 0);
    }

    #[test]
    fn movement_past_tap_threshold_cancels_long_tap() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchMove, 0, 4.0, 0.0, 20.0);
        assert!(rig.recognizer.pending_long_tap().is_some());
        rig.send(TouchMove, 0, 15.0, 0.0, 60.0);
        assert!(rig.recognizer.pending_long_tap().is_none());
        let id = rig.tracer.history()[0].id;
        assert!(rig.recognizer.is_tap_suppressed(id));

        // returning to the start does not turn it back into a tap
        rig.send(TouchMove, 0, 0.0, 0.0, 100.0);
        rig.send(TouchEnd, 0, 0.0, 0.0, 120.0);
        rig.recognizer.fire_due(2000.0, &rig.tracer);
        assert_eq!(rig.count(GestureKind::Tap), 0);
        assert_eq!(rig.count(GestureKind::LongTap), 0);
    }

    #[test]
    fn early_release_cancels_long_tap() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchEnd, 0, 0.0, 0.0, 400.0);
        assert!(rig.recognizer.pending_long_tap().is_none());
        rig.recognizer.fire_due(1000.0, &rig.tracer);
        assert_eq!(rig.count(GestureKind::LongTap), 0);
        // 400ms is too slow for a tap
        assert_eq!(rig.count(GestureKind::Tap), 0);
    }

    #[test]
    fn pinch_out_reports_double_span_without_rotation() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchStart, 1, 100.0, 0.0, 5.0);
        assert!(rig.recognizer.is_multi_touch_active());
        assert!(rig.recognizer.pending_long_tap().is_none());
        assert_eq!(rig.recognizer.pre_life(), Some(LifeId(1)));
        assert_eq!(rig.recognizer.cur_life(), Some(LifeId(2)));

        rig.send(TouchMove, 0, 0.0, 0.0, 30.0);
        rig.send(TouchMove, 1, 200.0, 0.0, 60.0);

        let log = rig.log.borrow();
        let zoom = log.iter().rev().find(|e| e.kind == GestureKind::Zoom).unwrap();
        let rotate = log.iter().rev().find(|e| e.kind == GestureKind::Rotate).unwrap();
        assert_eq!(zoom.zoom_rate, Some(2.0));
        assert!(rotate.angle.unwrap().abs() < 1e-9);
        assert_eq!(log.iter().filter(|e| e.kind == GestureKind::MultiStart).count(), 1);
        assert!(log.iter().any(|e| e.kind == GestureKind::MultiChange));
    }

    #[test]
    fn coincident_fingers_skip_zoom_but_keep_multichange() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 50.0, 50.0, 0.0);
        rig.send(TouchStart, 1, 50.0, 50.0, 5.0);
        rig.send(TouchMove, 1, 90.0, 50.0, 40.0);
        assert_eq!(rig.count(GestureKind::Zoom), 0);
        assert_eq!(rig.count(GestureKind::Rotate), 0);
        assert_eq!(rig.count(GestureKind::MultiChange), 1);
    }

    #[test]
    fn lifting_fingers_ends_multi_then_clears_flag() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchStart, 1, 100.0, 0.0, 5.0);
        rig.send(TouchEnd, 1, 100.0, 0.0, 50.0);
        assert_eq!(rig.count(GestureKind::MultiEnd), 1);
        assert!(rig.recognizer.is_multi_touch_active());
        assert_eq!(rig.recognizer.pre_life(), None);

        rig.send(TouchEnd, 0, 0.0, 0.0, 80.0);
        assert_eq!(rig.count(GestureKind::MultiEnd), 1);
        assert!(!rig.recognizer.is_multi_touch_active());
        // neither finger of the pinch classifies as a tap
        assert_eq!(rig.count(GestureKind::Tap), 0);
    }

    #[test]
    fn without_multi_each_finger_classifies_alone() {
        let mut rig = Rig::new(GestureConfig {
            use_multi: false,
            ..Default::default()
        });
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchStart, 1, 200.0, 200.0, 5.0);
        rig.send(TouchMove, 1, 260.0, 200.0, 40.0);
        rig.send(TouchEnd, 0, 0.0, 0.0, 90.0);
        rig.send(TouchEnd, 1, 260.0, 200.0, 100.0);
        for kind in [
            GestureKind::MultiStart,
            GestureKind::MultiChange,
            GestureKind::MultiEnd,
            GestureKind::Zoom,
            GestureKind::Rotate,
        ] {
            assert_eq!(rig.count(kind), 0, "{kind} fired");
        }
        assert_eq!(rig.count(GestureKind::Tap), 1);
        assert_eq!(rig.count(GestureKind::SwipeRight), 1);
    }

    #[test]
    fn multi_end_waits_until_one_contact_is_left() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchStart, 1, 100.0, 0.0, 5.0);
        rig.send(TouchStart, 2, 300.0, 0.0, 8.0);

        // a pair member lifts with three down
        rig.send(TouchEnd, 1, 100.0, 0.0, 40.0);
        assert_eq!(rig.count(GestureKind::MultiEnd), 0);
        assert_eq!(rig.recognizer.pre_life(), None);
        rig.send(TouchMove, 0, 0.0, 50.0, 60.0);
        assert_eq!(rig.count(GestureKind::Zoom), 0);

        // a fresh finger does not open a second pinch while the first is open
        rig.send(TouchStart, 3, 500.0, 0.0, 70.0);
        assert_eq!(rig.count(GestureKind::MultiStart), 1);
        rig.send(TouchEnd, 3, 500.0, 0.0, 80.0);

        rig.send(TouchEnd, 2, 300.0, 0.0, 90.0);
        assert_eq!(rig.count(GestureKind::MultiEnd), 1);
        assert_eq!(rig.tracer.active_count(), 1);
        rig.send(TouchEnd, 0, 0.0, 50.0, 120.0);
        assert_eq!(rig.count(GestureKind::MultiEnd), 1);
        assert!(!rig.recognizer.is_multi_touch_active());
    }

    #[test]
    fn without_multi_long_tap_belongs_to_newest_finger() {
        let mut rig = Rig::new(GestureConfig {
            use_multi: false,
            ..Default::default()
        });
        rig.send(TouchStart, 0, 10.0, 10.0, 0.0);
        rig.send(TouchStart, 1, 90.0, 10.0, 100.0);
        let pending = rig.recognizer.pending_long_tap().unwrap();
        assert_eq!(pending.life_id, LifeId(2));
        assert_eq!(pending.deadline, 850.0);

        // the first finger's own deadline (750) is gone
        rig.recognizer.fire_due(800.0, &rig.tracer);
        assert_eq!(rig.count(GestureKind::LongTap), 0);
        rig.recognizer.fire_due(850.0, &rig.tracer);
        let log = rig.log.borrow();
        let long: Vec<_> = log.iter().filter(|e| e.kind == GestureKind::LongTap).collect();
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].identifier, Some(1));
        assert_eq!(long[0].position, Point::new(90.0, 10.0));
    }

    #[test]
    fn abandoned_life_ends_its_drag_without_classifying() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, -1, 10.0, 10.0, 0.0);
        rig.send(TouchStart, -1, 10.0, 10.0, 100.0);
        assert_eq!(
            rig.kinds(),
            vec![GestureKind::DragStart, GestureKind::DragEnd, GestureKind::DragStart]
        );
        assert!(!rig.recognizer.is_multi_touch_active());
        assert_eq!(rig.recognizer.pending_long_tap().map(|p| p.life_id), Some(LifeId(2)));

        rig.send(TouchEnd, -1, 10.0, 10.0, 150.0);
        assert_eq!(rig.count(GestureKind::Tap), 1);
    }

    #[test]
    fn reset_forgets_pending_state() {
        let mut rig = Rig::new(GestureConfig::default());
        rig.send(TouchStart, 0, 0.0, 0.0, 0.0);
        rig.send(TouchEnd, 0, 0.0, 0.0, 10.0);
        rig.send(TouchStart, 0, 0.0, 0.0, 20.0);
        rig.recognizer.reset();
        assert_eq!(rig.recognizer.prev_tap(), None);
        assert_eq!(rig.recognizer.pending_long_tap(), None);
    }
}
