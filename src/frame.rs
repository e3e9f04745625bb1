use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A requestAnimationFrame loop that can be stopped.
///
/// The callback receives the frame timestamp in milliseconds and returns
/// whether to keep going. Dropping the loop stops it.
pub struct AnimationLoop {
    name: &'static str,
    tick: Tick,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(name: &'static str, mut frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            raf_clone.set(None);
            if !frame(now_ms) {
                log::debug!("[frame] {name} finished");
                return;
            }
            if let Some(id) = request(&tick_clone) {
                raf_clone.set(Some(id));
            }
        }) as Box<dyn FnMut(f64)>));
        raf_id.set(request(&tick));
        log::debug!("[frame] {name} started");
        Self { name, tick, raf_id }
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn stop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        if self.tick.borrow_mut().take().is_some() {
            log::debug!("[frame] {} stopped", self.name);
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request(tick: &Tick) -> Option<i32> {
    let w = web::window()?;
    let guard = tick.borrow();
    let cb = guard.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
