use crate::constants::TAP_SLOP_PX;
use crate::overlay;
use crate::AppState;
use glam::Vec2;
use luxtree_core::{pixel_to_ndc, InstanceHit, PointerInput};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Press/drag bookkeeping for the primary pointer, in CSS pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub pressed: bool,
    pub dragging: bool,
    pub down_at: Vec2,
    pub last: Vec2,
}

impl PointerState {
    fn press(&mut self, pos: Vec2) {
        self.pressed = true;
        self.dragging = false;
        self.down_at = pos;
        self.last = pos;
    }

    fn release(&mut self) {
        self.pressed = false;
        self.dragging = false;
    }
}

#[inline]
fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Vec2::ZERO;
    }
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Resolve the particle under the pointer, if any.
fn pick_at(st: &AppState, ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<InstanceHit> {
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    let ndc = pixel_to_ndc(pointer_canvas_px(ev, canvas), w, h);
    let (ro, rd) = st.camera.ray_from_ndc(ndc, w / h.max(1.0));
    st.scene.pick(ro, rd)
}

fn route(st: &mut AppState, input: PointerInput) {
    let now = st.clock.elapsed().as_secs_f64();
    st.scene.handle_pointer(input, now, &mut st.synth);
}

fn clear_hover(st: &mut AppState) {
    if let Some(leave) = st.hover.reset() {
        route(st, leave);
    }
}

/// Shared path for the mode button and the keyboard shortcut.
pub fn toggle_mode(state: &Rc<RefCell<AppState>>, document: &web::Document) {
    let mut guard = state.borrow_mut();
    let st = &mut *guard;
    if st.scene.toggle_mode(&mut st.synth).is_some() {
        overlay::sync_mode_button(document, st.scene.mode(), st.scene.is_started());
    }
}

pub fn wire_global_keydown(state: Rc<RefCell<AppState>>, document: web::Document) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            if ev.key() == " " {
                ev.prevent_default();
                if !ev.repeat() {
                    toggle_mode(&state, &document);
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_input_handlers(state: Rc<RefCell<AppState>>, canvas: web::HtmlCanvasElement) {
    // pointerdown
    {
        let state = state.clone();
        let canvas_target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            state.borrow_mut().pointer.press(client_pos(&ev));
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove: orbit while dragging, otherwise hover
    {
        let state = state.clone();
        let canvas_move = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut guard = state.borrow_mut();
            let st = &mut *guard;
            let pos = client_pos(&ev);
            if st.pointer.pressed {
                if !st.pointer.dragging && pos.distance(st.pointer.down_at) > TAP_SLOP_PX {
                    st.pointer.dragging = true;
                    st.pointer.last = st.pointer.down_at;
                    clear_hover(st);
                }
                if st.pointer.dragging {
                    let delta = pos - st.pointer.last;
                    st.camera.orbit_by(delta);
                    st.pointer.last = pos;
                    return;
                }
            }
            let hit = pick_at(st, &ev, &canvas_move);
            for input in st.hover.update(hit) {
                route(st, input);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup: a press that never left the slop is a tap
    {
        let state = state.clone();
        let canvas_up = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut guard = state.borrow_mut();
            let st = &mut *guard;
            let was_tap = st.pointer.pressed && !st.pointer.dragging;
            st.pointer.release();
            let _ = canvas_up.release_pointer_capture(ev.pointer_id());
            if !was_tap {
                return;
            }
            match pick_at(st, &ev, &canvas_up) {
                Some(hit) => {
                    log::debug!("[input] tap {:?}", hit);
                    for input in st.hover.tap(hit) {
                        route(st, input);
                    }
                }
                None => route(st, PointerInput::BackgroundTap),
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointercancel / pointerleave: drop the gesture and any hover
    for name in ["pointercancel", "pointerleave"] {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            let mut guard = state.borrow_mut();
            let st = &mut *guard;
            st.pointer.release();
            clear_hover(st);
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
