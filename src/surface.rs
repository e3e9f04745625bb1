use crate::dom::{self, Listener};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A canvas mounted into a host container.
///
/// Exactly one canvas per instance; `detach` removes it and is safe to call
/// any number of times.
pub struct Surface {
    container: web::Element,
    canvas: web::HtmlCanvasElement,
    square: bool,
    attached: Cell<bool>,
}

impl Surface {
    /// Create and append a canvas. A missing container is not an error.
    pub fn attach(container: Option<web::Element>, square: bool) -> Option<Self> {
        let Some(container) = container else {
            log::info!("[surface] no container; skipping");
            return None;
        };
        let document = dom::window_document()?;
        let canvas = document
            .create_element("canvas")
            .ok()?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        let style = canvas.style();
        _ = style.set_property("display", "block");
        _ = style.set_property("width", "100%");
        if !square {
            _ = style.set_property("height", "100%");
        }
        if let Err(e) = container.append_child(&canvas) {
            log::warn!("[surface] append failed: {e:?}");
            return None;
        }
        let surface = Self {
            container,
            canvas,
            square,
            attached: Cell::new(true),
        };
        let (w, h) = surface.resize();
        log::info!("[surface] attached {w}x{h} square={square}");
        Some(surface)
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Re-measure the container and update the backing store. Cheap when
    /// nothing changed.
    pub fn resize(&self) -> (u32, u32) {
        if !self.attached.get() {
            return (self.canvas.width(), self.canvas.height());
        }
        if self.square {
            let css_w = self.container.client_width().max(1);
            _ = self.canvas.style().set_property("height", &format!("{css_w}px"));
        }
        dom::sync_canvas_backing_size(&self.canvas, self.square)
    }

    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        self.canvas.remove();
        log::info!("[surface] detached");
    }
}

/// Re-measure `surface` whenever the window resizes.
pub fn follow_window(surface: &Rc<Surface>) -> Option<Listener> {
    let s = Rc::downgrade(surface);
    dom::window_listener("resize", move |_| {
        if let Some(s) = s.upgrade() {
            let (w, h) = s.resize();
            log::debug!("[surface] resized {w}x{h}");
        }
    })
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.detach();
    }
}
