//! Multi-touch gesture recognition for canvas UIs.
//!
//! Raw touch (or mouse) events flow through a [`TouchLifeTracer`], which
//! keeps one [`TouchLife`] per contact, into a [`GestureRecognizer`], which
//! turns lives into named [`GestureEvent`]s: taps, long taps, double taps,
//! swipes, a drag stream and two-finger zoom/rotate. [`GestureSession`] wires
//! the two together for a host; [`DomGestures`] binds a session to a DOM
//! element.

pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod life;
pub mod recognizer;
pub mod session;
pub mod tracer;
pub mod util;

pub use config::GestureConfig;
pub use dom::{AnimationFrameLoop, DomGestures};
pub use error::{GestureError, Result};
pub use event::{Dispatcher, GestureEvent, GestureKind, SwipeDirection};
pub use frame::{Frame, FrameScheduler, ManualFrames};
pub use geometry::{Point, Vector};
pub use life::{Identifier, LifeId, MOUSE_IDENTIFIER, TouchEventRecord, TouchLife, TouchPhase, TouchSample};
pub use recognizer::{GestureRecognizer, PendingLongTap, PrevTap};
pub use session::GestureSession;
pub use tracer::{LifeListener, NativeEventKind, NativeTouchEvent, TouchLifeTracer};
