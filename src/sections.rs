use crate::stage::Stage;
use stage_core::constants::VISIBILITY_THRESHOLD;
use stage_core::entrance::{Section, VisibilityGate};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// One-shot entrance trigger for a page section.
pub struct SectionObserver {
    observer: web::IntersectionObserver,
    _callback: ObserverCallback,
}

impl SectionObserver {
    pub fn observe(document: &web::Document, section: Section, stage: Rc<RefCell<Stage>>) -> Option<Self> {
        let anchor = document.query_selector(section.anchor()).ok().flatten()?;
        let mut gate = VisibilityGate::default();
        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    if gate.observe(entry.is_intersecting(), entry.intersection_ratio()) {
                        log::info!("[sections] {section:?} entrance");
                        stage.borrow_mut().run(&section.timeline());
                        observer.disconnect();
                        return;
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer = web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| log::warn!("[sections] observer failed: {e:?}"))
            .ok()?;
        observer.observe(&anchor);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
