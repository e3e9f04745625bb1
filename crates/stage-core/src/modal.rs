//! The "unrolling scroll" modal: Closed → Opening → Open → Closing → Closed.
//!
//! Each transition plays one composite timeline. The machine keeps the only
//! handle it started and treats a vanished handle as completion.

use crate::easing::{Easing, Shape};
use crate::timeline::{
    resolve_target, Offset, Property, Step, Target, TargetResolver, TimelineEngine,
    TimelineHandle, TimelineSpec,
};

pub const COLLAPSED_HEIGHT_PX: f32 = 40.0;
pub const EXPANDED_HEIGHT_PX: f32 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Elements the modal animates.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalTargets {
    /// Full-screen backdrop; also the node shown/hidden on mount.
    pub backdrop: Target,
    pub top_handle: Target,
    pub bottom_handle: Target,
    /// The parchment whose height unrolls.
    pub container: Target,
    pub content: Target,
}

impl Default for ModalTargets {
    fn default() -> Self {
        Self {
            backdrop: Target::selector("#decree-modal"),
            top_handle: Target::selector("#decree-top-handle"),
            bottom_handle: Target::selector("#decree-bottom-handle"),
            container: Target::selector("#decree-parchment"),
            content: Target::selector("#decree-content"),
        }
    }
}

impl ModalTargets {
    fn handles(&self) -> Target {
        Target::List(vec![self.top_handle.clone(), self.bottom_handle.clone()])
    }
}

pub fn open_timeline(t: &ModalTargets) -> TimelineSpec {
    TimelineSpec::named("modal-open")
        .easing(Easing::OUT_CUBIC)
        .at(
            0.0,
            Step::new(t.backdrop.clone())
                .from_to(Property::Opacity, 0.0, 1.0)
                .duration(300.0),
        )
        .at(
            200.0,
            Step::new(t.handles())
                .from_to(Property::RotateX, -5.0, 5.0)
                .duration(400.0)
                .easing(Easing::IN_OUT_SINE),
        )
        .at(
            400.0,
            Step::new(t.container.clone())
                .from_to(Property::Height, COLLAPSED_HEIGHT_PX, EXPANDED_HEIGHT_PX)
                .duration(1200.0)
                .easing(Easing::out_elastic(1.0, 0.6)),
        )
        .group(
            Offset::At(800.0),
            vec![
                Step::new(t.top_handle.clone())
                    .from_to(Property::RotateX, 5.0, 0.0)
                    .from_to(Property::TranslateY, 0.0, -10.0)
                    .duration(600.0),
                Step::new(t.bottom_handle.clone())
                    .from_to(Property::RotateX, 5.0, 0.0)
                    .from_to(Property::TranslateY, 0.0, 10.0)
                    .duration(600.0),
            ],
        )
        .at(
            1000.0,
            Step::new(t.content.clone())
                .from_to(Property::Opacity, 0.0, 1.0)
                .from_to(Property::TranslateY, -50.0, 0.0)
                .duration(800.0)
                .easing(Easing::OUT_QUART),
        )
        .at(
            1600.0,
            Step::new(t.container.clone())
                .keyframes(Property::Scale, &[1.0, 1.02, 1.0])
                .duration(500.0)
                .easing(Easing::IN_OUT_SINE),
        )
}

pub fn close_timeline(t: &ModalTargets) -> TimelineSpec {
    TimelineSpec::named("modal-close")
        .easing(Easing::IN_CUBIC)
        .at(
            0.0,
            Step::new(t.content.clone())
                .from_to(Property::Opacity, 1.0, 0.0)
                .from_to(Property::TranslateY, 0.0, -30.0)
                .duration(400.0),
        )
        .at(
            200.0,
            Step::new(t.handles())
                .from_to(Property::RotateX, 0.0, 10.0)
                .duration(300.0),
        )
        .at(
            400.0,
            Step::new(t.container.clone())
                .from_to(Property::Height, EXPANDED_HEIGHT_PX, COLLAPSED_HEIGHT_PX)
                .duration(800.0)
                .easing(Easing::In(Shape::Back { overshoot: 1.7 })),
        )
        .at(
            900.0,
            Step::new(t.handles())
                .from_to(Property::RotateX, 10.0, 0.0)
                .from_to(Property::TranslateY, 0.0, 0.0)
                .duration(400.0),
        )
        .at(
            1000.0,
            Step::new(t.backdrop.clone())
                .from_to(Property::Opacity, 1.0, 0.0)
                .duration(300.0),
        )
}

#[derive(Debug)]
pub struct ModalScroll {
    state: ModalState,
    targets: ModalTargets,
    running: Option<TimelineHandle>,
}

impl Default for ModalScroll {
    fn default() -> Self {
        Self::new(ModalTargets::default())
    }
}

impl ModalScroll {
    pub fn new(targets: ModalTargets) -> Self {
        Self {
            state: ModalState::Closed,
            targets,
            running: None,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn timeline(&self) -> Option<TimelineHandle> {
        self.running
    }

    /// Mount and unroll. Only valid from `Closed`; returns whether it started.
    pub fn open<R: TargetResolver + ?Sized>(
        &mut self,
        engine: &mut TimelineEngine,
        resolver: &mut R,
        now_ms: f64,
    ) -> bool {
        if self.state != ModalState::Closed {
            log::debug!("[modal] open ignored in {:?}", self.state);
            return false;
        }
        self.cancel_running(engine);
        let t = &self.targets;
        set(resolver, &t.backdrop, Property::Visible, 1.0);
        set(resolver, &t.container, Property::Height, COLLAPSED_HEIGHT_PX);
        set(resolver, &t.container, Property::Opacity, 1.0);
        set(resolver, &t.content, Property::Opacity, 0.0);
        set(resolver, &t.content, Property::TranslateY, -50.0);
        set(resolver, &t.top_handle, Property::RotateX, 0.0);
        set(resolver, &t.bottom_handle, Property::RotateX, 0.0);
        self.running = Some(engine.run(&open_timeline(t), resolver, now_ms));
        self.state = ModalState::Opening;
        log::info!("[modal] opening");
        true
    }

    /// Roll up. Only valid from `Open`; returns whether it started.
    pub fn close<R: TargetResolver + ?Sized>(
        &mut self,
        engine: &mut TimelineEngine,
        resolver: &mut R,
        now_ms: f64,
    ) -> bool {
        if self.state != ModalState::Open {
            log::debug!("[modal] close ignored in {:?}", self.state);
            return false;
        }
        self.cancel_running(engine);
        self.running = Some(engine.run(&close_timeline(&self.targets), resolver, now_ms));
        self.state = ModalState::Closing;
        log::info!("[modal] closing");
        true
    }

    /// Settle transitions whose timeline has finished. Call after
    /// [`TimelineEngine::tick`]. Returns the new state if it changed.
    pub fn update<R: TargetResolver + ?Sized>(
        &mut self,
        engine: &TimelineEngine,
        resolver: &mut R,
    ) -> Option<ModalState> {
        let handle = self.running?;
        if engine.is_active(handle) {
            return None;
        }
        self.running = None;
        self.state = match self.state {
            ModalState::Opening => ModalState::Open,
            ModalState::Closing => {
                set(resolver, &self.targets.backdrop, Property::Visible, 0.0);
                ModalState::Closed
            }
            other => other,
        };
        log::info!("[modal] {:?}", self.state);
        Some(self.state)
    }

    /// Drop whatever is playing and unmount immediately.
    pub fn reset<R: TargetResolver + ?Sized>(&mut self, engine: &mut TimelineEngine, resolver: &mut R) {
        self.cancel_running(engine);
        if self.state != ModalState::Closed {
            set(resolver, &self.targets.backdrop, Property::Visible, 0.0);
            self.state = ModalState::Closed;
        }
    }

    fn cancel_running(&mut self, engine: &mut TimelineEngine) {
        if let Some(h) = self.running.take() {
            engine.cancel(h);
        }
    }
}

fn set<R: TargetResolver + ?Sized>(resolver: &mut R, target: &Target, property: Property, value: f32) {
    for el in resolve_target(resolver, target) {
        resolver.apply(el, property, value);
    }
}
