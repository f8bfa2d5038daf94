//! Turns host touch events into `TouchLife` start/change/end notifications.

use log::{debug, trace};

use crate::config::GestureConfig;
use crate::frame::Frame;
use crate::life::{Identifier, LifeId, TouchLife, TouchSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeEventKind {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

/// Host event after its touch points were copied out.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeTouchEvent {
    pub kind: NativeEventKind,
    pub changed: Vec<TouchSample>,
    /// Milliseconds on the host clock.
    pub time: f64,
}

impl NativeTouchEvent {
    pub fn new(kind: NativeEventKind, changed: Vec<TouchSample>, time: f64) -> Self {
        Self {
            kind,
            changed,
            time,
        }
    }

    pub fn single(kind: NativeEventKind, sample: TouchSample, time: f64) -> Self {
        Self::new(kind, vec![sample], time)
    }
}

/// Receiver of tracer notifications. The tracer is passed back read-only so
/// a listener can inspect the other active lives.
pub trait LifeListener {
    fn on_life_start(&mut self, life: &TouchLife, tracer: &TouchLifeTracer);
    fn on_life_change(&mut self, life: &TouchLife, tracer: &TouchLifeTracer);
    fn on_life_end(&mut self, life: &TouchLife, tracer: &TouchLifeTracer);

    /// A life whose end was never delivered, closed because its identifier
    /// started again.
    fn on_life_abandoned(&mut self, life: &TouchLife, tracer: &TouchLifeTracer) {
        self.on_life_end(life, tracer);
    }
}

pub struct TouchLifeTracer {
    /// Every life ever started, ordered by id.
    history: Vec<TouchLife>,
    /// Ids of lives without an end, in start order.
    active: Vec<LifeId>,
    next_id: u64,
    frame_sync: bool,
    pending_move: Option<NativeTouchEvent>,
    last_frame: Option<Frame>,
    move_min_distance: f64,
    move_min_interval_ms: f64,
}

impl TouchLifeTracer {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            history: Vec::new(),
            active: Vec::new(),
            next_id: 1,
            frame_sync: config.frame_sync,
            pending_move: None,
            last_frame: None,
            move_min_distance: config.move_min_distance,
            move_min_interval_ms: config.move_min_interval_ms,
        }
    }

    pub fn frame_sync(&self) -> bool {
        self.frame_sync
    }

    pub fn history(&self) -> &[TouchLife] {
        &self.history
    }

    pub fn active(&self) -> impl Iterator<Item = &TouchLife> + '_ {
        self.active.iter().filter_map(|id| self.life(*id))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn life(&self, id: LifeId) -> Option<&TouchLife> {
        self.index_of(id).map(|i| &self.history[i])
    }

    pub fn active_life_for(&self, identifier: Identifier) -> Option<&TouchLife> {
        self.active_index_for(identifier).map(|i| &self.history[i])
    }

    pub fn has_pending_move(&self) -> bool {
        self.pending_move.is_some()
    }

    /// Drops ended lives from the history. Active lives are kept.
    pub fn clear_history(&mut self) {
        self.history.retain(TouchLife::is_active);
    }

    pub fn handle(&mut self, event: NativeTouchEvent, listener: &mut dyn LifeListener) {
        match event.kind {
            NativeEventKind::TouchStart => self.touch_start(&event, listener),
            NativeEventKind::TouchMove => self.touch_move(event, listener),
            NativeEventKind::TouchEnd | NativeEventKind::TouchCancel => {
                self.touch_end(&event, listener)
            }
        }
    }

    /// Starts a life for the first changed touch of the event.
    pub fn touch_start(&mut self, event: &NativeTouchEvent, listener: &mut dyn LifeListener) {
        let Some(sample) = event.changed.first().copied() else {
            return;
        };
        if let Some(stale) = self.active_index_for(sample.identifier) {
            debug!(
                "touchstart reuses active identifier {}, abandoning {}",
                sample.identifier, self.history[stale].id
            );
            self.abandon(stale, event.time, listener);
        }
        let id = LifeId(self.next_id);
        self.next_id += 1;
        self.history.push(TouchLife::begin(id, sample, event.time));
        self.active.push(id);
        debug!(
            "{id} started at ({}, {}) identifier={} active={}",
            sample.client_x,
            sample.client_y,
            sample.identifier,
            self.active.len()
        );
        let idx = self.history.len() - 1;
        listener.on_life_start(&self.history[idx], self);
    }

    /// Records moves now, or parks the event for the next frame in frame-sync mode.
    pub fn touch_move(&mut self, event: NativeTouchEvent, listener: &mut dyn LifeListener) {
        if self.frame_sync {
            if self.pending_move.is_some() {
                trace!("touchmove replaced before frame drain");
            }
            self.pending_move = Some(event);
            return;
        }
        self.process_move(&event, listener);
    }

    /// Drains the parked `touchmove`, at most once per frame.
    pub fn drain_frame(&mut self, frame: Frame, listener: &mut dyn LifeListener) {
        if self.last_frame == Some(frame) {
            return;
        }
        self.last_frame = Some(frame);
        if let Some(event) = self.pending_move.take() {
            self.process_move(&event, listener);
        }
    }

    pub fn touch_end(&mut self, event: &NativeTouchEvent, listener: &mut dyn LifeListener) {
        for sample in &event.changed {
            let Some(idx) = self.active_index_for(sample.identifier) else {
                trace!("orphan touchend for identifier {}", sample.identifier);
                continue;
            };
            if !self.history[idx].finish(*sample, event.time) {
                continue;
            }
            let id = self.history[idx].id;
            self.active.retain(|a| *a != id);
            self.drop_pending_for(sample.identifier);
            debug!(
                "{id} ended after {}ms, distance {:.1}px, active={}",
                self.history[idx].life_time,
                self.history[idx].distance(),
                self.active.len()
            );
            listener.on_life_end(&self.history[idx], self);
        }
    }

    fn process_move(&mut self, event: &NativeTouchEvent, listener: &mut dyn LifeListener) {
        for sample in &event.changed {
            let Some(idx) = self.active_index_for(sample.identifier) else {
                trace!("orphan touchmove for identifier {}", sample.identifier);
                continue;
            };
            let life = &mut self.history[idx];
            let accept = if life.move_events.is_empty() {
                true
            } else {
                let last = life.last_move_or_start();
                let moved = last.position().distance_to(sample.position());
                let elapsed = event.time - last.trigger_time;
                moved > self.move_min_distance && elapsed > self.move_min_interval_ms
            };
            if !accept {
                trace!("{} dropped redundant move sample", life.id);
                continue;
            }
            if !life.push_move(*sample, event.time) {
                trace!("{} dropped out-of-order move sample", life.id);
                continue;
            }
            trace!(
                "{} moved to ({}, {}), {} samples",
                life.id,
                sample.client_x,
                sample.client_y,
                life.move_events.len()
            );
            listener.on_life_change(&self.history[idx], self);
        }
    }

    /// Closes a life at its last known position without a host end event.
    fn abandon(&mut self, idx: usize, time: f64, listener: &mut dyn LifeListener) {
        let life = &mut self.history[idx];
        let last = life.last_move_or_start().sample;
        let identifier = life.identifier();
        if !life.finish(last, time) {
            return;
        }
        let id = life.id;
        self.active.retain(|a| *a != id);
        self.drop_pending_for(identifier);
        listener.on_life_abandoned(&self.history[idx], self);
    }

    /// Forgets parked move samples of an identifier whose life just ended.
    fn drop_pending_for(&mut self, identifier: Identifier) {
        let Some(pending) = self.pending_move.as_mut() else {
            return;
        };
        pending.changed.retain(|s| s.identifier != identifier);
        if pending.changed.is_empty() {
            self.pending_move = None;
        }
    }

    fn index_of(&self, id: LifeId) -> Option<usize> {
        self.history.binary_search_by_key(&id, |l| l.id).ok()
    }

    fn active_index_for(&self, identifier: Identifier) -> Option<usize> {
        self.active
            .iter()
            .filter_map(|id| self.index_of(*id))
            .find(|&i| self.history[i].identifier() == identifier)
    }
}
