//! Browser binding: feeds DOM touch or mouse events into a `GestureSession`,
//! arms long taps with `setTimeout` and, in frame-sync mode, drains parked
//! moves from a `requestAnimationFrame` loop.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, MouseEvent, TouchEvent, TouchList, Window};

use crate::config::GestureConfig;
use crate::error::{GestureError, Result};
use crate::event::{GestureEvent, GestureKind};
use crate::frame::{Frame, FrameListener, FrameScheduler};
use crate::life::{MOUSE_IDENTIFIER, TouchSample};
use crate::session::GestureSession;
use crate::tracer::{NativeEventKind, NativeTouchEvent};

type EventClosure = Closure<dyn FnMut(Event)>;
type ClosureCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn supports_touch(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Copies every touch of `list` into owned samples; the host objects are
/// not kept past the handler.
fn copy_touches(list: &TouchList) -> Vec<TouchSample> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchSample {
            identifier: t.identifier(),
            client_x: f64::from(t.client_x()),
            client_y: f64::from(t.client_y()),
            page_x: f64::from(t.page_x()),
            page_y: f64::from(t.page_y()),
            force: f64::from(t.force()),
        })
        .collect()
}

fn mouse_sample(e: &MouseEvent) -> TouchSample {
    TouchSample {
        identifier: MOUSE_IDENTIFIER,
        client_x: f64::from(e.client_x()),
        client_y: f64::from(e.client_y()),
        page_x: f64::from(e.page_x()),
        page_y: f64::from(e.page_y()),
        force: 0.0,
    }
}

/// `requestAnimationFrame` loop exposed as a `FrameScheduler`.
pub struct AnimationFrameLoop {
    window: Window,
    listeners: Rc<RefCell<Vec<FrameListener>>>,
    raf_id: Rc<RefCell<Option<i32>>>,
    closure_cell: ClosureCell,
}

impl AnimationFrameLoop {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            listeners: Rc::new(RefCell::new(Vec::new())),
            raf_id: Rc::new(RefCell::new(None)),
            closure_cell: Rc::new(RefCell::new(None)),
        }
    }

    pub fn start(&self) {
        if self.closure_cell.borrow().is_some() {
            return;
        }
        let listeners = self.listeners.clone();
        let raf_id = self.raf_id.clone();
        let window_loop = self.window.clone();
        let closure_cell_loop = self.closure_cell.clone();
        let mut counter = 0u64;
        *self.closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            counter += 1;
            for listener in listeners.borrow_mut().iter_mut() {
                listener(Frame(counter));
            }
            if let Some(cb) = closure_cell_loop.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
        }) as Box<dyn FnMut()>));
        if let Some(cb) = self.closure_cell.borrow().as_ref() {
            if let Ok(id) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                *self.raf_id.borrow_mut() = Some(id);
            }
        }
    }
}

impl FrameScheduler for AnimationFrameLoop {
    fn add_frame_listener(&mut self, listener: FrameListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.borrow_mut().take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // the loop closure holds a handle to its own cell
        self.closure_cell.borrow_mut().take();
    }
}

/// `setTimeout` mirror of the recognizer's pending long-tap deadline.
struct LongTapTimer {
    window: Window,
    session: GestureSession,
    timeout: Option<i32>,
    scheduled_for: Option<f64>,
    fire: ClosureCell,
}

impl LongTapTimer {
    fn new(window: Window, session: GestureSession) -> Rc<RefCell<Self>> {
        let timer = Rc::new(RefCell::new(Self {
            window,
            session,
            timeout: None,
            scheduled_for: None,
            fire: Rc::new(RefCell::new(None)),
        }));
        let weak = Rc::downgrade(&timer);
        let fire = Closure::wrap(Box::new(move || {
            let Some(timer) = weak.upgrade() else {
                return;
            };
            let (session, at) = {
                let mut t = timer.borrow_mut();
                t.timeout = None;
                t.scheduled_for = None;
                (t.session.clone(), now(&t.window))
            };
            session.tick(at);
            timer.borrow_mut().sync();
        }) as Box<dyn FnMut()>);
        *timer.borrow().fire.borrow_mut() = Some(fire);
        timer
    }

    /// Re-arms or clears the host timeout to match the session's deadline.
    fn sync(&mut self) {
        let deadline = self.session.long_tap_deadline();
        if deadline == self.scheduled_for {
            return;
        }
        if let Some(id) = self.timeout.take() {
            self.window.clear_timeout_with_handle(id);
        }
        self.scheduled_for = deadline;
        let Some(deadline) = deadline else {
            return;
        };
        let delay = (deadline - now(&self.window)).max(0.0).ceil() as i32;
        let fire = self.fire.borrow();
        let Some(cb) = fire.as_ref() else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay)
        {
            Ok(id) => self.timeout = Some(id),
            Err(e) => warn!("long tap timer not scheduled: {e:?}"),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.timeout.take() {
            self.window.clear_timeout_with_handle(id);
        }
        self.scheduled_for = None;
        self.fire.borrow_mut().take();
    }
}

/// Gesture recognition bound to a DOM element. Listeners are removed on drop.
pub struct DomGestures {
    session: GestureSession,
    target: EventTarget,
    window: Window,
    listeners: Vec<(EventTarget, &'static str, EventClosure)>,
    timer: Rc<RefCell<LongTapTimer>>,
    frames: Option<AnimationFrameLoop>,
}

impl DomGestures {
    pub fn attach(target: &JsValue, config: GestureConfig) -> Result<Self> {
        let target: EventTarget = target
            .dyn_ref::<EventTarget>()
            .cloned()
            .ok_or_else(|| GestureError::InvalidTarget(format!("{target:?}")))?;
        let window = web_sys::window().ok_or(GestureError::NoWindow)?;
        let prevent_default = config.prevent_default;
        let frame_sync = config.frame_sync;
        let session = GestureSession::new(config)?;
        let timer = LongTapTimer::new(window.clone(), session.clone());

        let mut gestures = Self {
            session,
            target,
            window: window.clone(),
            listeners: Vec::new(),
            timer,
            frames: None,
        };

        if supports_touch(&window) {
            for (name, kind, prevent) in [
                ("touchstart", NativeEventKind::TouchStart, prevent_default),
                ("touchmove", NativeEventKind::TouchMove, false),
                ("touchend", NativeEventKind::TouchEnd, prevent_default),
                ("touchcancel", NativeEventKind::TouchCancel, prevent_default),
            ] {
                let cb = gestures.touch_closure(&window, kind, prevent);
                gestures.listen(false, name, cb)?;
            }
        } else {
            // a button released outside the element still has to end the life
            for (name, kind, on_window) in [
                ("mousedown", NativeEventKind::TouchStart, false),
                ("mousemove", NativeEventKind::TouchMove, false),
                ("mouseup", NativeEventKind::TouchEnd, true),
            ] {
                let cb = gestures.mouse_closure(&window, kind);
                gestures.listen(on_window, name, cb)?;
            }
        }

        if frame_sync {
            let mut frames = AnimationFrameLoop::new(window);
            gestures.session.attach_frames(&mut frames);
            frames.start();
            gestures.frames = Some(frames);
        }
        debug!("gesture listeners attached ({})", gestures.listeners.len());
        Ok(gestures)
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn register(&self, kind: GestureKind, handler: impl FnMut(&GestureEvent) + 'static) {
        self.session.register(kind, handler);
    }

    fn listen(&mut self, on_window: bool, name: &'static str, cb: EventClosure) -> Result<()> {
        let target: EventTarget = if on_window {
            self.window.clone().into()
        } else {
            self.target.clone()
        };
        target
            .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
            .map_err(|e| GestureError::Listener {
                event: name,
                reason: format!("{e:?}"),
            })?;
        self.listeners.push((target, name, cb));
        Ok(())
    }

    fn touch_closure(&self, window: &Window, kind: NativeEventKind, prevent: bool) -> EventClosure {
        let session = self.session.clone();
        let timer = self.timer.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |e: Event| {
            let Some(e) = e.dyn_ref::<TouchEvent>() else {
                return;
            };
            if prevent {
                e.prevent_default();
            }
            let changed = copy_touches(&e.changed_touches());
            session.handle(NativeTouchEvent::new(kind, changed, now(&window)));
            timer.borrow_mut().sync();
        }) as Box<dyn FnMut(Event)>)
    }

    fn mouse_closure(&self, window: &Window, kind: NativeEventKind) -> EventClosure {
        let session = self.session.clone();
        let timer = self.timer.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |e: Event| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            match kind {
                NativeEventKind::TouchStart if e.button() != 0 => return,
                NativeEventKind::TouchMove if e.buttons() & 1 == 0 => return,
                _ => {}
            }
            let sample = mouse_sample(e);
            session.handle(NativeTouchEvent::single(kind, sample, now(&window)));
            timer.borrow_mut().sync();
        }) as Box<dyn FnMut(Event)>)
    }
}

impl Drop for DomGestures {
    fn drop(&mut self) {
        for (target, name, cb) in &self.listeners {
            let _ = target.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
        self.timer.borrow_mut().cancel();
        self.frames.take();
        debug!("gesture listeners detached");
    }
}
