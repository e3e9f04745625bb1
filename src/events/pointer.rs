use crate::dom::{self, Listener};
use stage_core::input::InputState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn window_size(w: &web::Window) -> (f32, f32) {
    let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (px(w.inner_width()), px(w.inner_height()))
}

/// Keep `input` in step with the window: pointer, scroll and viewport.
pub fn wire_input(input: Rc<RefCell<InputState>>) -> Vec<Listener> {
    if let Some(w) = web::window() {
        let (vw, vh) = window_size(&w);
        let mut s = input.borrow_mut();
        s.set_viewport(vw, vh);
        s.set_scroll(w.scroll_y().unwrap_or(0.0) as f32);
    }

    let mut listeners = Vec::with_capacity(3);

    let i = input.clone();
    listeners.extend(dom::window_listener("pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        i.borrow_mut()
            .set_pointer_client(ev.client_x() as f32, ev.client_y() as f32);
    }));

    let i = input.clone();
    listeners.extend(dom::window_listener("scroll", move |_| {
        if let Some(w) = web::window() {
            i.borrow_mut().set_scroll(w.scroll_y().unwrap_or(0.0) as f32);
        }
    }));

    listeners.extend(dom::window_listener("resize", move |_| {
        if let Some(w) = web::window() {
            let (vw, vh) = window_size(&w);
            input.borrow_mut().set_viewport(vw, vh);
        }
    }));

    listeners
}
