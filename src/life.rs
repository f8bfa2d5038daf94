//! Lifecycle record of a single contact point.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Identifier the host assigns to a contact (`Touch.identifier` on the web).
pub type Identifier = i32;

/// Synthetic identifier used when a mouse stands in for a finger.
pub const MOUSE_IDENTIFIER: Identifier = -1;

/// Value copy of a host touch point, taken while the host event is live.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    pub identifier: Identifier,
    pub client_x: f64,
    pub client_y: f64,
    pub page_x: f64,
    pub page_y: f64,
    pub force: f64,
}

impl TouchSample {
    /// Sample where client and page coordinates coincide (no scroll offset).
    pub fn at(identifier: Identifier, x: f64, y: f64) -> Self {
        Self {
            identifier,
            client_x: x,
            client_y: y,
            page_x: x,
            page_y: y,
            force: 0.0,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchEventRecord {
    pub phase: TouchPhase,
    pub sample: TouchSample,
    /// Milliseconds on the host clock.
    pub trigger_time: f64,
    pub life_id: LifeId,
}

impl TouchEventRecord {
    pub fn position(&self) -> Point {
        self.sample.position()
    }
}

/// Tracer-scoped life number; later lives always compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LifeId(pub u64);

impl std::fmt::Display for LifeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "life#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchLife {
    pub id: LifeId,
    pub start_event: TouchEventRecord,
    pub end_event: Option<TouchEventRecord>,
    pub move_events: Vec<TouchEventRecord>,
    /// Milliseconds between start and end; zero until the life ends.
    pub life_time: f64,
}

impl TouchLife {
    pub(crate) fn begin(id: LifeId, sample: TouchSample, time: f64) -> Self {
        Self {
            id,
            start_event: TouchEventRecord {
                phase: TouchPhase::Start,
                sample,
                trigger_time: time,
                life_id: id,
            },
            end_event: None,
            move_events: Vec::new(),
            life_time: 0.0,
        }
    }

    pub fn identifier(&self) -> Identifier {
        self.start_event.sample.identifier
    }

    pub fn is_active(&self) -> bool {
        self.end_event.is_none()
    }

    /// Most recent record: the end, else the last move, else the start.
    pub fn last_event(&self) -> &TouchEventRecord {
        self.end_event
            .as_ref()
            .or_else(|| self.move_events.last())
            .unwrap_or(&self.start_event)
    }

    /// Last move sample, falling back to the start sample.
    pub fn last_move_or_start(&self) -> &TouchEventRecord {
        self.move_events.last().unwrap_or(&self.start_event)
    }

    /// Start-to-end distance, or start-to-latest while the life is active.
    pub fn distance(&self) -> f64 {
        self.start_event
            .position()
            .distance_to(self.last_event().position())
    }

    /// Appends a move record. Samples not strictly later than the latest
    /// record are refused so `move_events` stays strictly time-ordered.
    pub(crate) fn push_move(&mut self, sample: TouchSample, time: f64) -> bool {
        if time <= self.last_event().trigger_time {
            return false;
        }
        self.move_events.push(TouchEventRecord {
            phase: TouchPhase::Move,
            sample,
            trigger_time: time,
            life_id: self.id,
        });
        true
    }

    /// Sets the end record. Returns `false` if the life had already ended.
    pub(crate) fn finish(&mut self, sample: TouchSample, time: f64) -> bool {
        if self.end_event.is_some() {
            return false;
        }
        let time = time.max(self.last_event().trigger_time);
        self.end_event = Some(TouchEventRecord {
            phase: TouchPhase::End,
            sample,
            trigger_time: time,
            life_id: self.id,
        });
        self.life_time = time - self.start_event.trigger_time;
        true
    }
}
