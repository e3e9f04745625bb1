use crate::targets::DomResolver;
use fnv::FnvHashMap;
use stage_core::modal::ModalScroll;
use stage_core::timeline::{ElementRef, TimelineEngine, TimelineHandle, TimelineSpec};
use web_sys as web;

/// Timeline engine, its DOM resolver and the modal, ticked together by one
/// animation loop.
pub struct Stage {
    engine: TimelineEngine,
    resolver: DomResolver,
    modal: ModalScroll,
    pending: Vec<(f64, TimelineSpec)>,
    feedback: FnvHashMap<ElementRef, TimelineHandle>,
}

impl Stage {
    pub fn new(document: web::Document) -> Self {
        Self {
            engine: TimelineEngine::new(),
            resolver: DomResolver::new(document),
            modal: ModalScroll::default(),
            pending: Vec::new(),
            feedback: FnvHashMap::default(),
        }
    }

    pub fn resolver_mut(&mut self) -> &mut DomResolver {
        &mut self.resolver
    }

    pub fn run(&mut self, spec: &TimelineSpec) -> TimelineHandle {
        self.engine.run(spec, &mut self.resolver, instant::now())
    }

    /// Run a hover/focus tween on `element`, replacing the one still playing
    /// on it so the newest request owns its scale.
    pub fn run_feedback(&mut self, element: ElementRef, spec: &TimelineSpec) -> TimelineHandle {
        if let Some(prev) = self.feedback.remove(&element) {
            self.engine.cancel(prev);
        }
        let handle = self.run(spec);
        self.feedback.insert(element, handle);
        handle
    }

    /// Start `spec` once `delay_ms` has elapsed on the frame clock.
    pub fn run_after(&mut self, delay_ms: f64, spec: TimelineSpec) {
        self.pending.push((instant::now() + delay_ms, spec));
    }

    pub fn open_modal(&mut self) -> bool {
        self.modal
            .open(&mut self.engine, &mut self.resolver, instant::now())
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal
            .close(&mut self.engine, &mut self.resolver, instant::now())
    }

    pub fn tick(&mut self) {
        let now = instant::now();
        if !self.pending.is_empty() {
            let (due, later): (Vec<_>, Vec<_>) =
                self.pending.drain(..).partition(|(at, _)| *at <= now);
            self.pending = later;
            for (_, spec) in due {
                self.engine.run(&spec, &mut self.resolver, now);
            }
        }
        let finished = self.engine.tick(&mut self.resolver, now);
        if !finished.is_empty() {
            self.feedback.retain(|_, h| !finished.contains(h));
        }
        self.modal.update(&self.engine, &mut self.resolver);
    }

    /// Stop everything in place and unmount the modal.
    pub fn shutdown(&mut self) {
        self.pending.clear();
        self.feedback.clear();
        self.modal.reset(&mut self.engine, &mut self.resolver);
        self.engine.cancel_all();
        self.resolver.prune();
    }
}
