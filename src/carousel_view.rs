use crate::constants::{
    CAROUSEL_ACCENT_ATTR, CAROUSEL_INDEX_ATTR, CAROUSEL_INDEX_SELECTOR, CAROUSEL_ITEM_SELECTOR,
    CAROUSEL_TITLE_ATTR, FALLBACK_ACCENTS,
};
use crate::dom::{self, Listener};
use crate::frame::AnimationLoop;
use crate::render::GpuState;
use crate::scene_view::GpuSink;
use crate::style::parse_hex_color;
use crate::surface::{follow_window, Surface};
use stage_core::carousel::{CarouselController, CarouselItem, CarouselParams};
use stage_core::draw::{carousel_into, DrawList};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Items declared by the page, or a default set when there are none.
fn collect_items(document: &web::Document) -> Vec<CarouselItem> {
    let declared: Vec<CarouselItem> = dom::query_all(document, CAROUSEL_ITEM_SELECTOR)
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let title = el
                .get_attribute(CAROUSEL_TITLE_ATTR)
                .or_else(|| el.text_content())
                .unwrap_or_default();
            let accent = el
                .get_attribute(CAROUSEL_ACCENT_ATTR)
                .and_then(|s| parse_hex_color(&s))
                .unwrap_or(FALLBACK_ACCENTS[i % FALLBACK_ACCENTS.len()]);
            CarouselItem::new(i as u32, title.trim(), accent)
        })
        .collect();
    if !declared.is_empty() {
        return declared;
    }
    FALLBACK_ACCENTS
        .iter()
        .enumerate()
        .map(|(i, &accent)| CarouselItem::new(i as u32, format!("Project {}", i + 1), accent))
        .collect()
}

/// Mark the indicator button matching `focused`.
pub(crate) fn sync_indicators(document: &web::Document, focused: usize) {
    for el in dom::query_all(document, CAROUSEL_INDEX_SELECTOR) {
        let idx = el
            .get_attribute(CAROUSEL_INDEX_ATTR)
            .and_then(|v| v.parse::<usize>().ok());
        let active = idx == Some(focused);
        _ = el.class_list().toggle_with_force("active", active);
        _ = el.set_attribute("aria-current", if active { "true" } else { "false" });
    }
}

struct CarouselState {
    controller: Rc<RefCell<CarouselController>>,
    gpu: GpuState,
    list: DrawList,
    canvas: web::HtmlCanvasElement,
}

pub struct CarouselView {
    surface: Rc<Surface>,
    controller: Rc<RefCell<CarouselController>>,
    frame_loop: Option<AnimationLoop>,
    listeners: Vec<Listener>,
}

impl CarouselView {
    pub async fn mount(document: &web::Document, container: Option<web::Element>) -> anyhow::Result<Option<Self>> {
        let Some(surface) = Surface::attach(container, true) else {
            return Ok(None);
        };
        let surface = Rc::new(surface);
        let canvas = surface.canvas().clone();
        let gpu = GpuState::new(&canvas).await?;

        let items = collect_items(document);
        log::info!("[carousel] {} items", items.len());
        let mut controller = CarouselController::new(items, CarouselParams::default());
        controller.camera_mut().set_viewport(canvas.width(), canvas.height());
        let controller = Rc::new(RefCell::new(controller));
        sync_indicators(document, 0);

        let mut listeners: Vec<Listener> = [("pointerenter", true), ("pointerleave", false)]
            .into_iter()
            .filter_map(|(event, hovered)| {
                let c = controller.clone();
                Listener::new(&canvas, event, move |_| c.borrow_mut().set_hovered(hovered))
            })
            .collect();
        listeners.extend(follow_window(&surface));

        let state = RefCell::new(CarouselState {
            controller: controller.clone(),
            gpu,
            list: DrawList::default(),
            canvas,
        });
        let doc = document.clone();
        let frame_loop = AnimationLoop::start("carousel", move |_| {
            let mut guard = state.borrow_mut();
            let CarouselState {
                controller,
                gpu,
                list,
                canvas,
            } = &mut *guard;
            let now = instant::now();
            {
                let mut c = controller.borrow_mut();
                c.camera_mut().set_viewport(canvas.width(), canvas.height());
                if let Some(focused) = c.tick(now) {
                    sync_indicators(&doc, focused);
                }
                carousel_into(&c, list);
            }
            GpuSink { gpu, list, canvas }.present().is_ok()
        });

        Ok(Some(Self {
            surface,
            controller,
            frame_loop: Some(frame_loop),
            listeners,
        }))
    }

    /// Shared handle for the click wiring.
    pub fn controller(&self) -> Rc<RefCell<CarouselController>> {
        self.controller.clone()
    }

    pub fn unmount(&mut self) {
        if let Some(mut l) = self.frame_loop.take() {
            l.stop();
        }
        self.listeners.clear();
        self.surface.detach();
    }
}

impl Drop for CarouselView {
    fn drop(&mut self) {
        self.unmount();
    }
}
