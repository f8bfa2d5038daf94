//! Gesture event shapes and the registry that routes them to consumers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::life::{Identifier, TouchLife};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Tap,
    LongTap,
    DoubleTap,
    DragStart,
    Dragging,
    DragEnd,
    Swipe,
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
    MultiStart,
    MultiChange,
    MultiEnd,
    Zoom,
    Rotate,
}

impl GestureKind {
    pub const ALL: [GestureKind; 16] = [
        GestureKind::Tap,
        GestureKind::LongTap,
        GestureKind::DoubleTap,
        GestureKind::DragStart,
        GestureKind::Dragging,
        GestureKind::DragEnd,
        GestureKind::Swipe,
        GestureKind::SwipeUp,
        GestureKind::SwipeDown,
        GestureKind::SwipeLeft,
        GestureKind::SwipeRight,
        GestureKind::MultiStart,
        GestureKind::MultiChange,
        GestureKind::MultiEnd,
        GestureKind::Zoom,
        GestureKind::Rotate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::LongTap => "longtap",
            GestureKind::DoubleTap => "doubletap",
            GestureKind::DragStart => "dragstart",
            GestureKind::Dragging => "dragging",
            GestureKind::DragEnd => "dragend",
            GestureKind::Swipe => "swipe",
            GestureKind::SwipeUp => "swipeup",
            GestureKind::SwipeDown => "swipedown",
            GestureKind::SwipeLeft => "swipeleft",
            GestureKind::SwipeRight => "swiperight",
            GestureKind::MultiStart => "multistart",
            GestureKind::MultiChange => "multichange",
            GestureKind::MultiEnd => "multiend",
            GestureKind::Zoom => "zoom",
            GestureKind::Rotate => "rotate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of travel from `start` to `end`; the horizontal axis wins ties.
    pub fn between(start: Point, end: Point) -> Self {
        let dx = start.x - end.x;
        let dy = start.y - end.y;
        if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            }
        } else if dy > 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        }
    }

    /// The directional alias fired alongside `swipe`.
    pub fn alias(self) -> GestureKind {
        match self {
            SwipeDirection::Up => GestureKind::SwipeUp,
            SwipeDirection::Down => GestureKind::SwipeDown,
            SwipeDirection::Left => GestureKind::SwipeLeft,
            SwipeDirection::Right => GestureKind::SwipeRight,
        }
    }
}

/// Payload handed to gesture handlers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    #[serde(rename = "type")]
    pub kind: GestureKind,
    pub position: Point,
    pub create_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SwipeDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life: Option<TouchLife>,
}

impl GestureEvent {
    pub fn new(kind: GestureKind, position: Point, create_time: f64) -> Self {
        Self {
            kind,
            position,
            create_time,
            identifier: None,
            direction: None,
            zoom_rate: None,
            angle: None,
            life: None,
        }
    }

    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn with_direction(mut self, direction: SwipeDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_zoom_rate(mut self, rate: f64) -> Self {
        self.zoom_rate = Some(rate);
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_life(mut self, life: &TouchLife) -> Self {
        self.life = Some(life.clone());
        self
    }

    /// Same payload re-tagged, used for the directional swipe alias.
    pub fn retagged(&self, kind: GestureKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }
}

pub type GestureHandler = Box<dyn FnMut(&GestureEvent)>;

/// Routes each event to the handlers registered for its kind, in
/// registration order. Handler panics are not caught.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<GestureKind, Vec<GestureHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: GestureKind, handler: impl FnMut(&GestureEvent) + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    pub fn unregister_all(&mut self, kind: GestureKind) {
        self.handlers.remove(&kind);
    }

    pub fn handler_count(&self, kind: GestureKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    pub fn dispatch(&mut self, event: &GestureEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn names_round_trip() {
        for kind in GestureKind::ALL {
            assert_eq!(GestureKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(GestureKind::from_name("pinch"), None);
    }

    #[test]
    fn direction_prefers_horizontal_on_ties() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(SwipeDirection::between(o, Point::new(50.0, 0.0)), SwipeDirection::Right);
        assert_eq!(SwipeDirection::between(o, Point::new(-50.0, 10.0)), SwipeDirection::Left);
        assert_eq!(SwipeDirection::between(o, Point::new(5.0, -40.0)), SwipeDirection::Up);
        assert_eq!(SwipeDirection::between(o, Point::new(5.0, 40.0)), SwipeDirection::Down);
        assert_eq!(SwipeDirection::between(o, Point::new(40.0, 40.0)), SwipeDirection::Right);
    }

    #[test]
    fn dispatch_reaches_only_matching_handlers() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        for tag in ["a", "b"] {
            let hits = hits.clone();
            dispatcher.register(GestureKind::Tap, move |e| {
                hits.borrow_mut().push((tag, e.kind));
            });
        }
        let other = hits.clone();
        dispatcher.register(GestureKind::Swipe, move |e| other.borrow_mut().push(("s", e.kind)));

        dispatcher.dispatch(&GestureEvent::new(GestureKind::Tap, Point::default(), 0.0));
        assert_eq!(*hits.borrow(), vec![("a", GestureKind::Tap), ("b", GestureKind::Tap)]);

        dispatcher.unregister_all(GestureKind::Tap);
        assert_eq!(dispatcher.handler_count(GestureKind::Tap), 0);
        assert_eq!(dispatcher.handler_count(GestureKind::Swipe), 1);
    }

    #[test]
    fn payload_serializes_with_type_tag() {
        let e = GestureEvent::new(GestureKind::SwipeLeft, Point::new(1.0, 2.0), 5.0)
            .with_direction(SwipeDirection::Left);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "swipeleft");
        assert_eq!(json["direction"], "left");
        assert!(json.get("zoom_rate").is_none());
    }
}
