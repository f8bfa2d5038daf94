//! Plane geometry used by the recognizer: sample positions, displacement
//! vectors and the two-finger span math behind `zoom` and `rotate`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }
}

impl std::ops::Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors lifted into z = 0.
    pub fn cross_z(self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

/// Ratio of the current span to the initial one, `None` when the initial
/// span has zero length or the result is not finite.
pub fn span_ratio(initial: Vector, current: Vector) -> Option<f64> {
    let base = initial.length();
    if base == 0.0 {
        return None;
    }
    let rate = current.length() / base;
    rate.is_finite().then_some(rate)
}

/// Signed angle in degrees from `initial` to `current`.
///
/// The sign follows `cross(current, initial).z`, so a counter-clockwise turn
/// in screen space (y grows downward) reads as a positive angle. Floating
/// point overshoot of the cosine is clamped into `[-1, 1]` before `acos`.
pub fn signed_angle_deg(initial: Vector, current: Vector) -> Option<f64> {
    let denom = initial.length() * current.length();
    if denom == 0.0 {
        return None;
    }
    let cos = (current.dot(initial) / denom).clamp(-1.0, 1.0);
    let cross = current.cross_z(initial);
    let sign = if cross < 0.0 { -1.0 } else { 1.0 };
    let angle = cos.acos().to_degrees() * sign;
    angle.is_finite().then_some(angle)
}
