pub mod camera;
pub mod gesture_log;
pub mod marks;

pub use camera::Camera;
pub use gesture_log::{GestureLog, LogAction};
pub use marks::{Marks, mark_color};
