pub mod app;
pub mod camera_controls;
pub mod event_log;
pub mod gesture_canvas;
pub mod settings_modal;
