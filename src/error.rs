use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("gesture target is not an event target: {0}")]
    InvalidTarget(String),
    #[error("no global `window` to schedule frames and timers on")]
    NoWindow,
    #[error("failed to register `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
    #[error("invalid gesture config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GestureError>;
