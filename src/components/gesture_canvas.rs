use std::cell::RefCell;
use std::rc::Rc;

use canvas_gestures::{
    AnimationFrameLoop, DomGestures, FrameScheduler, GestureConfig, GestureError, GestureEvent,
    GestureKind, GestureSession, Identifier, Point,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::state::{Camera, Marks, mark_color};
use canvas_gestures::util::clog;

const GRID_STEP: f64 = 64.0;

#[derive(Properties, PartialEq, Clone)]
pub struct GestureCanvasProps {
    pub config: GestureConfig,
    pub on_gesture: Callback<GestureEvent>,
}

/// Everything a mounted canvas keeps alive; dropping it detaches all listeners.
struct Mounted {
    window: Window,
    _gestures: DomGestures,
    _frames: AnimationFrameLoop,
    resize_cb: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref());
    }
}

fn to_canvas(canvas: &HtmlCanvasElement, p: Point) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (p.x - rect.left(), p.y - rect.top())
}

fn fit_to_window(canvas: &HtmlCanvasElement, window: &Window) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

fn draw(
    canvas: &HtmlCanvasElement,
    cam: &Camera,
    marks: &Marks,
    session: &GestureSession,
    now: f64,
) {
    if !canvas.is_connected() {
        return;
    }
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let w = f64::from(canvas.width());
    let h = f64::from(canvas.height());

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);

    // world grid
    ctx.set_transform(cam.zoom, 0.0, 0.0, cam.zoom, cam.offset_x, cam.offset_y)
        .ok();
    let (x0, y0) = cam.to_world(0.0, 0.0);
    let (x1, y1) = cam.to_world(w, h);
    ctx.set_stroke_style_str("#2f3641");
    ctx.set_line_width((1.0 / cam.zoom).max(0.001));
    let mut x = (x0 / GRID_STEP).floor() * GRID_STEP;
    while x <= x1 {
        ctx.begin_path();
        ctx.move_to(x, y0);
        ctx.line_to(x, y1);
        ctx.stroke();
        x += GRID_STEP;
    }
    let mut y = (y0 / GRID_STEP).floor() * GRID_STEP;
    while y <= y1 {
        ctx.begin_path();
        ctx.move_to(x0, y);
        ctx.line_to(x1, y);
        ctx.stroke();
        y += GRID_STEP;
    }

    for (mark, alpha) in marks.visible(now) {
        ctx.set_global_alpha(alpha);
        ctx.begin_path();
        ctx.set_stroke_style_str(mark_color(mark.kind));
        ctx.set_line_width(3.0 / cam.zoom);
        let r = (18.0 + 24.0 * (1.0 - alpha)) / cam.zoom;
        ctx.arc(mark.position.x, mark.position.y, r, 0.0, std::f64::consts::PI * 2.0)
            .ok();
        ctx.stroke();
    }
    ctx.set_global_alpha(1.0);

    // live finger traces in screen space
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    let rect = canvas.get_bounding_client_rect();
    session.with_tracer(|tracer| {
        for life in tracer.active() {
            ctx.begin_path();
            ctx.set_stroke_style_str("#58a6ff");
            ctx.set_line_width(2.0);
            let start = life.start_event.position();
            ctx.move_to(start.x - rect.left(), start.y - rect.top());
            for m in &life.move_events {
                let p = m.position();
                ctx.line_to(p.x - rect.left(), p.y - rect.top());
            }
            ctx.stroke();
            let last = life.last_move_or_start().position();
            ctx.begin_path();
            ctx.set_fill_style_str("#1f6feb");
            ctx.arc(
                last.x - rect.left(),
                last.y - rect.top(),
                14.0,
                0.0,
                std::f64::consts::PI * 2.0,
            )
            .ok();
            ctx.fill();
        }
    });
}

fn mount(
    canvas: HtmlCanvasElement,
    config: GestureConfig,
    camera: Rc<RefCell<Camera>>,
    marks: Rc<RefCell<Marks>>,
    on_gesture: Callback<GestureEvent>,
    zoom_view: UseStateSetter<f64>,
) -> Result<Mounted, GestureError> {
    let window = web_sys::window().ok_or(GestureError::NoWindow)?;
    fit_to_window(&canvas, &window);
    let gestures = DomGestures::attach(&JsValue::from(canvas.clone()), config)?;

    // one finger pans while no pinch is running
    let drag_anchor: Rc<RefCell<Option<(Identifier, Point)>>> = Rc::new(RefCell::new(None));
    {
        let drag_anchor = drag_anchor.clone();
        gestures.register(GestureKind::DragStart, move |e| {
            let mut anchor = drag_anchor.borrow_mut();
            if anchor.is_none() {
                *anchor = e.identifier.map(|id| (id, e.position));
            }
        });
    }
    {
        let drag_anchor = drag_anchor.clone();
        let camera = camera.clone();
        gestures.register(GestureKind::Dragging, move |e| {
            let mut anchor = drag_anchor.borrow_mut();
            let Some((id, last)) = *anchor else {
                return;
            };
            if e.identifier != Some(id) {
                return;
            }
            let mut cam = camera.borrow_mut();
            if cam.pinch_base.is_none() {
                cam.pan_by(e.position.x - last.x, e.position.y - last.y);
            }
            *anchor = Some((id, e.position));
        });
    }
    {
        let drag_anchor = drag_anchor.clone();
        gestures.register(GestureKind::DragEnd, move |e| {
            let mut anchor = drag_anchor.borrow_mut();
            if anchor.is_some_and(|(id, _)| e.identifier == Some(id)) {
                *anchor = None;
            }
        });
    }
    {
        let camera = camera.clone();
        let drag_anchor = drag_anchor.clone();
        gestures.register(GestureKind::MultiStart, move |_| {
            camera.borrow_mut().begin_pinch();
            *drag_anchor.borrow_mut() = None;
        });
    }
    {
        let camera = camera.clone();
        let canvas = canvas.clone();
        let zoom_view = zoom_view.clone();
        gestures.register(GestureKind::Zoom, move |e| {
            let Some(rate) = e.zoom_rate else {
                return;
            };
            let (cx, cy) = to_canvas(&canvas, e.position);
            let mut cam = camera.borrow_mut();
            cam.apply_pinch(rate, cx, cy);
            zoom_view.set(cam.zoom);
        });
    }
    {
        let camera = camera.clone();
        gestures.register(GestureKind::MultiEnd, move |_| camera.borrow_mut().end_pinch());
    }
    {
        let camera = camera.clone();
        let zoom_view = zoom_view.clone();
        gestures.register(GestureKind::DoubleTap, move |_| {
            camera.borrow_mut().reset();
            zoom_view.set(1.0);
        });
    }
    for kind in [
        GestureKind::Tap,
        GestureKind::DoubleTap,
        GestureKind::LongTap,
        GestureKind::Swipe,
    ] {
        let camera = camera.clone();
        let marks = marks.clone();
        let canvas = canvas.clone();
        gestures.register(kind, move |e| {
            let (sx, sy) = to_canvas(&canvas, e.position);
            let (wx, wy) = camera.borrow().to_world(sx, sy);
            marks.borrow_mut().push(kind, Point::new(wx, wy), e.create_time);
        });
    }
    for kind in GestureKind::ALL {
        if matches!(kind, GestureKind::Dragging | GestureKind::MultiChange) {
            continue;
        }
        let on_gesture = on_gesture.clone();
        gestures.register(kind, move |e| on_gesture.emit(e.clone()));
    }

    // redraw every frame
    let mut frames = AnimationFrameLoop::new(window.clone());
    {
        let canvas = canvas.clone();
        let session = gestures.session().clone();
        let window = window.clone();
        frames.add_frame_listener(Box::new(move |_| {
            let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
            let mut m = marks.borrow_mut();
            m.expire(now);
            draw(&canvas, &camera.borrow(), &m, &session, now);
        }));
    }
    frames.start();

    let resize_cb = {
        let canvas = canvas.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |_e: web_sys::Event| {
            fit_to_window(&canvas, &window);
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
        .map_err(|e| GestureError::Listener {
            event: "resize",
            reason: format!("{e:?}"),
        })?;

    Ok(Mounted {
        window,
        _gestures: gestures,
        _frames: frames,
        resize_cb,
    })
}

#[function_component(GestureCanvas)]
pub fn gesture_canvas(props: &GestureCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let marks = use_mut_ref(Marks::default);
    let zoom_view = use_state(|| 1.0_f64);

    // re-attach whenever the config changes
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let marks = marks.clone();
        let on_gesture = props.on_gesture.clone();
        let zoom_setter = zoom_view.setter();
        use_effect_with(props.config.clone(), move |config| {
            let mounted = match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => mount(canvas, config.clone(), camera, marks, on_gesture, zoom_setter)
                    .map_err(|e| clog(&format!("gesture canvas setup failed: {e}")))
                    .ok(),
                None => {
                    clog("canvas_ref not attached to a canvas element");
                    None
                }
            };
            move || drop(mounted)
        });
    }

    let step_zoom = |factor: f64| {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let zoom_view = zoom_view.clone();
        Callback::from(move |_: ()| {
            let (cx, cy) = canvas_ref
                .cast::<HtmlCanvasElement>()
                .map(|c| (f64::from(c.width()) / 2.0, f64::from(c.height()) / 2.0))
                .unwrap_or((0.0, 0.0));
            let mut cam = camera.borrow_mut();
            let target = cam.zoom * factor;
            cam.zoom_around(target, cx, cy);
            zoom_view.set(cam.zoom);
        })
    };
    let on_zoom_in = step_zoom(1.25);
    let on_zoom_out = step_zoom(0.8);
    let on_center = {
        let camera = camera.clone();
        let zoom_view = zoom_view.clone();
        Callback::from(move |_: ()| {
            camera.borrow_mut().reset();
            zoom_view.set(1.0);
        })
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden;">
            <canvas ref={canvas_ref} style="display:block; touch-action:none;"></canvas>
            <CameraControls zoom={*zoom_view} {on_zoom_in} {on_zoom_out} {on_center} />
        </div>
    }
}
