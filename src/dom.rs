use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// All elements matching `selector`, in document order. Invalid selectors
/// yield nothing.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// An installed event listener; removed from its target on drop.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| log::warn!("[dom] add {event} listener failed: {e:?}"))
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Attach `handler` to every element matching `selector`; the handler gets
/// the element it was attached to.
pub fn on_each(
    document: &web::Document,
    selector: &str,
    event: &'static str,
    handler: impl Fn(&web::Element, web::Event) + Clone + 'static,
) -> Vec<Listener> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|el| {
            let h = handler.clone();
            let target = el.clone();
            Listener::new(&el, event, move |ev| h(&target, ev))
        })
        .collect()
}

pub fn window_listener(event: &'static str, handler: impl FnMut(web::Event) + 'static) -> Option<Listener> {
    let window = web::window()?;
    Listener::new(&window, event, handler)
}

pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Match the canvas backing store to its CSS box; returns the new size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, square: bool) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = crate::style::backing_size(rect.width(), rect.height(), device_pixel_ratio(), square);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}
