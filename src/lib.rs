#![cfg(target_arch = "wasm32")]
use stage_core::constants::HERO_INTRO_DELAY_MS;
use stage_core::entrance::{self, Section};
use stage_core::input::InputState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod carousel_view;
mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod scene_view;
mod sections;
mod stage;
mod style;
mod surface;
mod targets;
mod trail_view;

use carousel_view::CarouselView;
use constants::{CAROUSEL_ROOT_ID, SCENE_ROOT_ID};
use frame::AnimationLoop;
use scene_view::SceneView;
use sections::SectionObserver;
use stage::Stage;
use trail_view::TrailView;

/// Everything mounted by `start`, dropped in reverse order by `unmount`.
struct App {
    listeners: Vec<dom::Listener>,
    observers: Vec<SectionObserver>,
    stage: Rc<RefCell<Stage>>,
    stage_loop: AnimationLoop,
    trail: Option<TrailView>,
    carousel: Option<CarouselView>,
    scene: Option<SceneView>,
}

impl App {
    fn shutdown(mut self) {
        self.listeners.clear();
        self.observers.clear();
        self.stage_loop.stop();
        self.stage.borrow_mut().shutdown();
        if let Some(mut t) = self.trail.take() {
            t.unmount();
        }
        if let Some(mut c) = self.carousel.take() {
            c.unmount();
        }
        if let Some(mut s) = self.scene.take() {
            s.unmount();
        }
        log::info!("[stage] unmounted");
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static UNMOUNT_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neon-stage starting");

    spawn_local(async move {
        match init().await {
            Ok(app) => {
                if UNMOUNT_REQUESTED.with(|u| u.get()) {
                    app.shutdown();
                    return;
                }
                APP.with(|slot| *slot.borrow_mut() = Some(app));
            }
            Err(e) => log::error!("init error: {:?}", e),
        }
    });
    Ok(())
}

/// Tear down every canvas, loop, listener and observer. Safe to call more
/// than once, and before initialisation has finished.
#[wasm_bindgen]
pub fn unmount() {
    UNMOUNT_REQUESTED.with(|u| u.set(true));
    if let Some(app) = APP.with(|slot| slot.borrow_mut().take()) {
        app.shutdown();
    }
}

async fn init() -> anyhow::Result<App> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let stage = Rc::new(RefCell::new(Stage::new(document.clone())));
    {
        let mut s = stage.borrow_mut();
        s.run(&entrance::loading_gate());
        s.run_after(HERO_INTRO_DELAY_MS, entrance::hero_intro());
    }
    let st = stage.clone();
    let stage_loop = AnimationLoop::start("stage", move |_| {
        st.borrow_mut().tick();
        true
    });

    let input = Rc::new(RefCell::new(InputState::default()));
    let mut listeners = Vec::new();
    let mut observers = Vec::new();

    let scene = match SceneView::mount(document.get_element_by_id(SCENE_ROOT_ID), input.clone()).await {
        Ok(v) => v,
        Err(e) => {
            log::error!("[render] background unavailable: {e:?}");
            None
        }
    };
    let carousel = match CarouselView::mount(&document, document.get_element_by_id(CAROUSEL_ROOT_ID)).await {
        Ok(v) => v,
        Err(e) => {
            log::error!("[carousel] unavailable: {e:?}");
            None
        }
    };
    let trail = TrailView::mount(&document);

    listeners.extend(events::wire_input(input));
    if let Some(c) = &carousel {
        listeners.extend(events::wire_carousel(&document, c.controller()));
    }
    listeners.extend(events::wire_modal(&document, &stage));
    listeners.extend(events::wire_feedback(&document, &stage));
    listeners.extend(events::wire_trigger(&stage));

    for section in Section::ALL.into_iter().filter(|s| s.observed()) {
        observers.extend(SectionObserver::observe(&document, section, stage.clone()));
    }

    log::info!(
        "[stage] mounted scene={} carousel={} trail={}",
        scene.is_some(),
        carousel.is_some(),
        trail.is_some()
    );
    Ok(App {
        listeners,
        observers,
        stage,
        stage_loop,
        trail,
        carousel,
        scene,
    })
}
