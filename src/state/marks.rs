// Short-lived markers drawn where discrete gestures landed
use std::collections::VecDeque;

use canvas_gestures::{GestureKind, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub kind: GestureKind,
    pub position: Point,
    pub created: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marks {
    items: VecDeque<Mark>,
    capacity: usize,
    ttl_ms: f64,
}

impl Default for Marks {
    fn default() -> Self {
        Self::new(32, 900.0)
    }
}

impl Marks {
    pub fn new(capacity: usize, ttl_ms: f64) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            ttl_ms,
        }
    }

    pub fn push(&mut self, kind: GestureKind, position: Point, created: f64) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Mark {
            kind,
            position,
            created,
        });
    }

    pub fn expire(&mut self, now: f64) {
        while self
            .items
            .front()
            .is_some_and(|m| now - m.created > self.ttl_ms)
        {
            self.items.pop_front();
        }
    }

    /// Marks with their remaining opacity in `(0, 1]`.
    pub fn visible(&self, now: f64) -> impl Iterator<Item = (&Mark, f64)> + '_ {
        self.items.iter().filter_map(move |m| {
            let alpha = 1.0 - (now - m.created) / self.ttl_ms;
            (alpha > 0.0).then_some((m, alpha.min(1.0)))
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub fn mark_color(kind: GestureKind) -> &'static str {
    match kind {
        GestureKind::Tap => "#58a6ff",
        GestureKind::DoubleTap => "#a371f7",
        GestureKind::LongTap => "#f0883e",
        GestureKind::Swipe
        | GestureKind::SwipeUp
        | GestureKind::SwipeDown
        | GestureKind::SwipeLeft
        | GestureKind::SwipeRight => "#2ea043",
        _ => "#8b949e",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_drops_oldest() {
        let mut marks = Marks::new(2, 1000.0);
        for i in 0..3 {
            marks.push(GestureKind::Tap, Point::new(f64::from(i), 0.0), 0.0);
        }
        let xs: Vec<f64> = marks.visible(0.0).map(|(m, _)| m.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn marks_fade_then_expire() {
        let mut marks = Marks::new(4, 100.0);
        marks.push(GestureKind::LongTap, Point::default(), 0.0);
        let (_, alpha) = marks.visible(50.0).next().unwrap();
        assert!((alpha - 0.5).abs() < 1e-9);
        marks.expire(150.0);
        assert_eq!(marks.len(), 0);
    }
}
