//! Rolling list of recognized gestures shown in the side panel.

use std::collections::VecDeque;
use std::rc::Rc;

use canvas_gestures::{GestureEvent, GestureKind};
use yew::Reducible;

pub const LOG_CAPACITY: usize = 40;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub seq: u64,
    pub kind: GestureKind,
    pub summary: String,
}

impl LogEntry {
    fn describe(event: &GestureEvent) -> String {
        let mut parts = vec![format!("({:.0}, {:.0})", event.position.x, event.position.y)];
        if let Some(d) = event.direction {
            parts.push(format!("dir={d:?}").to_lowercase());
        }
        if let Some(rate) = event.zoom_rate {
            parts.push(format!("rate={rate:.2}"));
        }
        if let Some(angle) = event.angle {
            parts.push(format!("angle={angle:.1}°"));
        }
        if let Some(life) = &event.life {
            parts.push(format!("{}ms", life.life_time.round()));
        }
        parts.join(" ")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureLog {
    pub entries: VecDeque<LogEntry>,
    next_seq: u64,
}

pub enum LogAction {
    Record(GestureEvent),
    Clear,
}

impl Reducible for GestureLog {
    type Action = LogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LogAction::Record(event) => {
                if next.entries.len() == LOG_CAPACITY {
                    next.entries.pop_back();
                }
                next.entries.push_front(LogEntry {
                    seq: next.next_seq,
                    kind: event.kind,
                    summary: LogEntry::describe(&event),
                });
                next.next_seq += 1;
            }
            LogAction::Clear => next.entries.clear(),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_gestures::{Point, SwipeDirection};

    #[test]
    fn newest_entry_comes_first_and_capacity_holds() {
        let mut log = Rc::new(GestureLog::default());
        for i in 0..(LOG_CAPACITY + 3) {
            let e = GestureEvent::new(GestureKind::Tap, Point::new(i as f64, 0.0), 0.0);
            log = log.reduce(LogAction::Record(e));
        }
        assert_eq!(log.entries.len(), LOG_CAPACITY);
        assert_eq!(log.entries[0].seq, (LOG_CAPACITY + 2) as u64);
        log = log.reduce(LogAction::Clear);
        assert!(log.entries.is_empty());
    }

    #[test]
    fn summary_mentions_direction() {
        let e = GestureEvent::new(GestureKind::Swipe, Point::new(3.0, 4.0), 0.0)
            .with_direction(SwipeDirection::Left);
        let log = Rc::new(GestureLog::default()).reduce(LogAction::Record(e));
        assert_eq!(log.entries[0].summary, "(3, 4) dir=left");
    }
}
