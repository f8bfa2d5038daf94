//! Recognizer and tracer thresholds. Distances are CSS pixels, durations
//! are milliseconds.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Enables the two-finger path (`multi*`, `zoom`, `rotate`).
    pub use_multi: bool,
    /// Processes at most one `touchmove` per render tick.
    pub frame_sync: bool,
    /// Calls `preventDefault()` on start/end so the page does not scroll or zoom.
    pub prevent_default: bool,
    pub tap_max_distance: f64,
    pub tap_max_duration_ms: f64,
    pub double_tap_interval_ms: f64,
    pub double_tap_max_distance: f64,
    pub swipe_min_distance: f64,
    pub swipe_max_duration_ms: f64,
    pub long_tap_delay_ms: f64,
    /// Move samples closer than this to the last recorded one are dropped.
    pub move_min_distance: f64,
    /// Move samples sooner than this after the last recorded one are dropped.
    pub move_min_interval_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            use_multi: true,
            frame_sync: false,
            prevent_default: true,
            tap_max_distance: 10.0,
            tap_max_duration_ms: 300.0,
            double_tap_interval_ms: 300.0,
            double_tap_max_distance: 10.0,
            swipe_min_distance: 30.0,
            swipe_max_duration_ms: 300.0,
            long_tap_delay_ms: 750.0,
            move_min_distance: 1.0,
            move_min_interval_ms: 16.0,
        }
    }
}

impl GestureConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| GestureError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // plain struct of bools and floats; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("tap_max_distance", self.tap_max_distance),
            ("tap_max_duration_ms", self.tap_max_duration_ms),
            ("double_tap_interval_ms", self.double_tap_interval_ms),
            ("double_tap_max_distance", self.double_tap_max_distance),
            ("swipe_min_distance", self.swipe_min_distance),
            ("swipe_max_duration_ms", self.swipe_max_duration_ms),
            ("long_tap_delay_ms", self.long_tap_delay_ms),
            ("move_min_distance", self.move_min_distance),
            ("move_min_interval_ms", self.move_min_interval_ms),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(GestureError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
