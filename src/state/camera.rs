// Canvas camera driven by drag, pinch and double tap gestures
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Zoom level when the current pinch began; `None` outside a pinch.
    pub pinch_base: Option<f64>,
}

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 8.0;

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            pinch_base: None,
        }
    }
}

impl Camera {
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn begin_pinch(&mut self) {
        self.pinch_base = Some(self.zoom);
    }

    pub fn end_pinch(&mut self) {
        self.pinch_base = None;
    }

    /// Scales around the screen point `(cx, cy)` so it stays fixed.
    pub fn zoom_around(&mut self, new_zoom: f64, cx: f64, cy: f64) {
        let new_zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let world_x = (cx - self.offset_x) / self.zoom;
        let world_y = (cy - self.offset_y) / self.zoom;
        self.zoom = new_zoom;
        self.offset_x = cx - world_x * new_zoom;
        self.offset_y = cy - world_y * new_zoom;
    }

    /// Applies a pinch rate relative to the zoom captured at pinch start.
    pub fn apply_pinch(&mut self, rate: f64, cx: f64, cy: f64) {
        let base = self.pinch_base.unwrap_or(self.zoom);
        self.zoom_around(base * rate, cx, cy);
    }

    pub fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.offset_x) / self.zoom, (sy - self.offset_y) / self.zoom)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinch_scales_from_base_zoom() {
        let mut cam = Camera::default();
        cam.begin_pinch();
        cam.apply_pinch(1.5, 0.0, 0.0);
        cam.apply_pinch(2.0, 0.0, 0.0);
        assert_eq!(cam.zoom, 2.0);
        cam.end_pinch();
        assert_eq!(cam.pinch_base, None);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut cam = Camera::default();
        cam.pan_by(30.0, -10.0);
        let before = cam.to_world(200.0, 150.0);
        cam.zoom_around(3.0, 200.0, 150.0);
        let after = cam.to_world(200.0, 150.0);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();
        cam.zoom_around(100.0, 0.0, 0.0);
        assert_eq!(cam.zoom, MAX_ZOOM);
        cam.reset();
        assert_eq!(cam, Camera::default());
    }
}
